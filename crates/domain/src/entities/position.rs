use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's stake in a pool, pro-rata at fetch time.
///
/// The per-asset amounts are the position's share of reserves when the
/// snapshot was taken; they do not live-update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPosition {
    pub pool_id: String,
    pub shares: Decimal,
    pub asset_a_amount: Decimal,
    pub asset_b_amount: Decimal,
    #[serde(rename = "valueUSD")]
    pub value_usd: Decimal,
    /// Annualized yield percentage as reported by the server.
    pub apy: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decodes_wire_payload() {
        let json = r#"{
            "poolId": "TKT_USDC",
            "shares": "50.5",
            "assetAAmount": "25.25",
            "assetBAmount": "50.5",
            "valueUSD": 101.0,
            "apy": 12.4
        }"#;
        let position: LiquidityPosition = serde_json::from_str(json).unwrap();
        assert_eq!(position.shares, dec!(50.5));
        assert_eq!(position.value_usd, dec!(101));
        assert_eq!(position.apy, dec!(12.4));
    }
}
