use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use straightedge_types::Coin;

/// Chain identity
#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
    /// Bech32 human-readable prefix for both account types
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
    /// Staking/fee denomination (18 decimals)
    #[serde(default = "default_denom")]
    pub denom: String,
}

fn default_chain_id() -> String {
    "straightedge-2".to_string()
}

fn default_address_prefix() -> String {
    "str".to_string()
}

fn default_denom() -> String {
    "astr".to_string()
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            address_prefix: default_address_prefix(),
            denom: default_denom(),
        }
    }
}

/// LCD (REST gateway) configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LcdConfig {
    #[serde(default = "default_lcd_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_lcd_url() -> String {
    "http://straightedge.rpc.sikka.tech:1318".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            url: default_lcd_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Fixed transaction parameters for the migration transfer
#[derive(Debug, Deserialize, Clone)]
pub struct TxConfig {
    /// Fee in atomic units of `chain.denom`
    #[serde(default = "default_fee_amount")]
    pub fee_amount: String,
    #[serde(default = "default_gas")]
    pub gas: String,
    #[serde(default = "default_memo")]
    pub memo: String,
}

fn default_fee_amount() -> String {
    "25000000000000000".to_string()
}

fn default_gas() -> String {
    "100000".to_string()
}

fn default_memo() -> String {
    "sr25519 to secp key migration".to_string()
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            fee_amount: default_fee_amount(),
            gas: default_gas(),
            memo: default_memo(),
        }
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub lcd: LcdConfig,
    #[serde(default)]
    pub tx: TxConfig,
}

/// Everything the transaction pipeline needs to know about the chain,
/// passed explicitly instead of read from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub chain_id: String,
    pub address_prefix: String,
    pub fee: Coin,
    pub gas: String,
    pub memo: String,
}

impl Default for ChainParams {
    fn default() -> Self {
        AppConfig::default().chain_params()
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STRAIGHTEDGE_LCD__URL, STRAIGHTEDGE_TX__MEMO
            .add_source(
                Environment::with_prefix("STRAIGHTEDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn chain_params(&self) -> ChainParams {
        ChainParams {
            chain_id: self.chain.chain_id.clone(),
            address_prefix: self.chain.address_prefix.clone(),
            fee: Coin::new(self.chain.denom.clone(), self.tx.fee_amount.clone()),
            gas: self.tx.gas.clone(),
            memo: self.tx.memo.clone(),
        }
    }
}
