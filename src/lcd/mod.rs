//! Chain access: balance and account queries plus transaction broadcast.
//!
//! The session talks to the chain only through [`ChainGateway`], so tests
//! can substitute a stub for the LCD REST client.

pub mod client;

pub use client::LcdClient;

use async_trait::async_trait;
use straightedge_types::{Coin, StdTx};

use crate::error::MigrateResult;

/// Account number and sequence needed for signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSequence {
    pub account_number: u64,
    pub sequence: u64,
}

/// Transaction broadcast result (mempool acceptance, not inclusion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
    pub txhash: String,
    pub code: u32,
    pub raw_log: String,
}

impl BroadcastResult {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Narrow view of the chain the migration needs.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// All balances held by `address`. An empty list means the account is
    /// unknown to the chain.
    async fn account_balances(&self, address: &str) -> MigrateResult<Vec<Coin>>;

    /// Account number and current sequence of `address`.
    async fn account_sequence(&self, address: &str) -> MigrateResult<AccountSequence>;

    /// Submit a signed transaction in sync mode. Called at most once per
    /// transaction; failures are not retried.
    async fn submit_transaction(&self, tx: &StdTx) -> MigrateResult<BroadcastResult>;
}
