mod amount;
mod secret;

pub use amount::{Amount, AmountConversionError};
pub use secret::Secret;

/// The name of the upstream quote provider. Used as the prefix of cache keys.
pub const QUOTE_PROVIDER: &str = "CoinMarketCap";
