mod currency;

pub mod helpers;
mod secret;

pub use currency::{usd_to_crypto, CryptoCurrency, CurrencyConversionError, BTC_USD_RATE};
pub use secret::Secret;
