//! Adapters that plug the remote collaborators into the engine traits.
pub mod cmc;
pub mod wallet;

pub use cmc::CmcMarketData;
pub use wallet::RemoteWallet;
