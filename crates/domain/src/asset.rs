//! Asset codes tradable through the panel.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed set of assets the remote DEX supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetCode {
    /// Brazilian Real (on/off-ramp currency).
    Brl,
    /// EventCoin Token.
    Tkt,
    /// USD Coin.
    Usdc,
    /// Stellar Lumens.
    Xlm,
}

impl AssetCode {
    /// All supported assets, in display order.
    pub const ALL: [AssetCode; 4] = [
        AssetCode::Brl,
        AssetCode::Tkt,
        AssetCode::Usdc,
        AssetCode::Xlm,
    ];

    /// The wire/ticker code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AssetCode::Brl => "BRL",
            AssetCode::Tkt => "TKT",
            AssetCode::Usdc => "USDC",
            AssetCode::Xlm => "XLM",
        }
    }

    /// Human-readable asset name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AssetCode::Brl => "Brazilian Real",
            AssetCode::Tkt => "EventCoin Token",
            AssetCode::Usdc => "USD Coin",
            AssetCode::Xlm => "Stellar Lumens",
        }
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AssetCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(AssetCode::Brl),
            "TKT" => Ok(AssetCode::Tkt),
            "USDC" => Ok(AssetCode::Usdc),
            "XLM" => Ok(AssetCode::Xlm),
            other => Err(DomainError::UnknownAsset(other.to_string())),
        }
    }
}
