use crate::asset::AssetCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price impact above which a quote is flagged so the user can be warned
/// before submitting.
pub const HIGH_IMPACT_THRESHOLD_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// A priced conversion estimate from the remote pricing service.
///
/// A quote is valid only for the (source, destination, amount) triple
/// that produced it and must be discarded whenever any of them changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub amount_out: Decimal,
    /// Percentage deviation the swap causes from the pre-trade price.
    #[serde(rename = "priceImpact")]
    pub price_impact_pct: Decimal,
    /// Trading fee, denominated in the source asset.
    pub fee: Decimal,
    /// Ordered hop sequence; first element is the source asset, last is
    /// the destination.
    pub route: Vec<AssetCode>,
}

impl SwapQuote {
    /// Whether the quote's price impact exceeds the warning threshold.
    #[must_use]
    pub fn is_high_impact(&self) -> bool {
        self.price_impact_pct > HIGH_IMPACT_THRESHOLD_PCT
    }

    /// Whether the route endpoints match the pair that was requested.
    ///
    /// The route is server-authoritative; a mismatch is reported to the
    /// caller rather than rejected.
    #[must_use]
    pub fn route_matches(&self, from: AssetCode, to: AssetCode) -> bool {
        self.route.first() == Some(&from) && self.route.last() == Some(&to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(price_impact_pct: Decimal) -> SwapQuote {
        SwapQuote {
            amount_out: dec!(199.4),
            price_impact_pct,
            fee: dec!(0.3),
            route: vec![AssetCode::Brl, AssetCode::Usdc, AssetCode::Tkt],
        }
    }

    #[test]
    fn test_high_impact_threshold() {
        assert!(!quote(dec!(0.1)).is_high_impact());
        assert!(!quote(dec!(0.5)).is_high_impact());
        assert!(quote(dec!(0.51)).is_high_impact());
    }

    #[test]
    fn test_route_endpoints() {
        let q = quote(dec!(0.1));
        assert!(q.route_matches(AssetCode::Brl, AssetCode::Tkt));
        assert!(!q.route_matches(AssetCode::Tkt, AssetCode::Brl));
        assert!(!q.route_matches(AssetCode::Brl, AssetCode::Usdc));
    }

    #[test]
    fn test_decodes_wire_payload() {
        let json = r#"{
            "amountOut": "199.4",
            "priceImpact": 0.12,
            "fee": "0.3",
            "route": ["BRL", "USDC", "TKT"]
        }"#;
        let q: SwapQuote = serde_json::from_str(json).unwrap();
        assert_eq!(q.amount_out, dec!(199.4));
        assert_eq!(q.price_impact_pct, dec!(0.12));
        assert_eq!(q.route.len(), 3);
    }
}
