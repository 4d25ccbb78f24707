pub mod address;
pub mod config;
pub mod error;
pub mod keys;
pub mod lcd;
pub mod session;
pub mod signer;
pub mod tx;

pub use crate::config::{AppConfig, ChainParams};
pub use error::{MigrateError, MigrateResult};
pub use lcd::{AccountSequence, BroadcastResult, ChainGateway, LcdClient};
pub use session::{DerivedAccounts, Session};
