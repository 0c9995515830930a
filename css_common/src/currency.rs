use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::helpers::round_dp;

/// Mock spot price for BTC. USDC and USDT are pegged at $1.
pub const BTC_USD_RATE: f64 = 60_000.0;

//--------------------------------------   CryptoCurrency   -----------------------------------------------------------
/// The settlement currencies the store accepts. Stored and serialized as their uppercase ticker codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoCurrency {
    #[default]
    Usdc,
    Usdt,
    Btc,
}

impl Display for CryptoCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CryptoCurrency::Usdc => write!(f, "USDC"),
            CryptoCurrency::Usdt => write!(f, "USDT"),
            CryptoCurrency::Btc => write!(f, "BTC"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Unsupported currency: {0}")]
pub struct CurrencyConversionError(String);

impl FromStr for CryptoCurrency {
    type Err = CurrencyConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USDC" => Ok(Self::Usdc),
            "USDT" => Ok(Self::Usdt),
            "BTC" => Ok(Self::Btc),
            s => Err(CurrencyConversionError(s.to_string())),
        }
    }
}

/// The mock price oracle. Converts a USD amount into the equivalent crypto-denominated amount using the
/// hard-coded spot prices. Stablecoins round to cents, BTC to satoshi precision. Never fails.
pub fn usd_to_crypto(amount_usd: f64, currency: CryptoCurrency) -> f64 {
    match currency {
        CryptoCurrency::Usdc | CryptoCurrency::Usdt => round_dp(amount_usd, 2),
        CryptoCurrency::Btc => round_dp(amount_usd / BTC_USD_RATE, 8),
    }
}
