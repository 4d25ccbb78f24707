use thiserror::Error;

/// Errors raised while deriving keys, building, signing or broadcasting a
/// migration transaction.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Invalid key length: {0}")]
    InvalidKeyLength(String),

    #[error("Invalid {scheme} public key length: expected {expected} bytes, got {actual}")]
    InvalidPublicKeyLength {
        scheme: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid account number or sequence: {0}")]
    InvalidAccountNumber(String),

    #[error("No account found for address {0}")]
    AccountNotFound(String),

    #[error("Account {address} holds no {expected} balance")]
    DenomMismatch { address: String, expected: String },

    #[error("Insufficient balance to pay fees: balance {balance}, fee {fee}")]
    InsufficientBalance { balance: u128, fee: u128 },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("LCD returned HTTP {status}: {body}")]
    Lcd { status: u16, body: String },

    #[error("Transaction {txhash} rejected with code {code}: {raw_log}")]
    TxRejected {
        code: u32,
        txhash: String,
        raw_log: String,
    },
}

impl MigrateError {
    pub fn derivation<S: Into<String>>(msg: S) -> Self {
        Self::Derivation(msg.into())
    }

    pub fn signing<S: Into<String>>(msg: S) -> Self {
        Self::Signing(msg.into())
    }

    /// Whether the condition is something the user can act on, as opposed to
    /// an internal invariant violation.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::InvalidMnemonic(_)
            | Self::AccountNotFound(_)
            | Self::DenomMismatch { .. }
            | Self::InsufficientBalance { .. }
            | Self::Config(_)
            | Self::Network(_)
            | Self::Lcd { .. }
            | Self::TxRejected { .. } => true,
            Self::Derivation(_)
            | Self::InvalidKeyLength(_)
            | Self::InvalidPublicKeyLength { .. }
            | Self::InvalidAddress(_)
            | Self::InvalidAmount(_)
            | Self::InvalidAccountNumber(_)
            | Self::Signing(_)
            | Self::Serialization(_) => false,
        }
    }
}

/// Result type alias using MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
