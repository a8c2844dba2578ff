use crate::asset::AssetCode;
use crate::math::proportional::estimate_counterpart;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a two-asset liquidity pool as reported by the remote API.
///
/// `price_a` and `price_b` are independent server-reported values and are
/// not required to invert exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub pool_id: String,
    pub asset_a: AssetCode,
    pub asset_b: AssetCode,
    pub reserves_a: Decimal,
    pub reserves_b: Decimal,
    pub total_shares: Decimal,
    /// Price of asset A denominated in asset B.
    pub price_a: Decimal,
    /// Price of asset B denominated in asset A.
    pub price_b: Decimal,
    /// Total value locked in USD.
    #[serde(rename = "liquidity")]
    pub liquidity_usd: Decimal,
}

impl Pool {
    /// Display label for the pair, e.g. `TKT/USDC`.
    #[must_use]
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.asset_a, self.asset_b)
    }

    /// Projects the asset-B amount matching a deposit of `amount_a`,
    /// preserving the current reserve ratio.
    #[must_use]
    pub fn counterpart_for_a(&self, amount_a: Decimal) -> Option<Decimal> {
        estimate_counterpart(self.reserves_a, self.reserves_b, amount_a)
    }

    /// Projects the asset-A amount matching a deposit of `amount_b`.
    #[must_use]
    pub fn counterpart_for_b(&self, amount_b: Decimal) -> Option<Decimal> {
        estimate_counterpart(self.reserves_b, self.reserves_a, amount_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pool(reserves_a: Decimal, reserves_b: Decimal) -> Pool {
        Pool {
            pool_id: "TKT_USDC".to_string(),
            asset_a: AssetCode::Tkt,
            asset_b: AssetCode::Usdc,
            reserves_a,
            reserves_b,
            total_shares: dec!(1000),
            price_a: dec!(2),
            price_b: dec!(0.5),
            liquidity_usd: dec!(4000),
        }
    }

    #[test]
    fn test_counterpart_projection_both_sides() {
        let pool = pool(dec!(1000), dec!(2000));
        assert_eq!(pool.counterpart_for_a(dec!(100)), Some(dec!(200)));
        assert_eq!(pool.counterpart_for_b(dec!(200)), Some(dec!(100)));
    }

    #[test]
    fn test_counterpart_empty_reserve_is_none() {
        let pool = pool(Decimal::ZERO, dec!(2000));
        assert_eq!(pool.counterpart_for_a(dec!(100)), None);
    }

    #[test]
    fn test_decodes_wire_payload() {
        let json = r#"{
            "poolId": "TKT_USDC",
            "assetA": "TKT",
            "assetB": "USDC",
            "reservesA": "1000",
            "reservesB": "2000",
            "totalShares": "1414.21",
            "priceA": 2.0,
            "priceB": 0.5,
            "liquidity": 4000.0
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.asset_a, AssetCode::Tkt);
        assert_eq!(pool.reserves_b, dec!(2000));
        assert_eq!(pool.liquidity_usd, dec!(4000));
        assert_eq!(pool.pair_label(), "TKT/USDC");
    }
}
