//! Amino-JSON wire types for Straightedge legacy (pre-protobuf) transactions.
//!
//! These mirror the JSON the chain's LCD gateway accepts on `POST /txs` and
//! the sign document a signer commits to. Field names and nesting are
//! wire-compatible and must not change.

use serde::{Deserialize, Serialize};

/// Amino type identifier of a bank send message.
pub const MSG_SEND_TYPE: &str = "cosmos-sdk/MsgSend";

/// Amino type identifier of an sr25519 public key.
pub const PUBKEY_SR25519_TYPE: &str = "tendermint/PubKeySr25519";

/// A single denomination amount. `amount` is a base-10 integer string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Fee paid for a transaction together with its gas limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// Funds transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

/// A transaction message in its amino envelope (`{"type", "value"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Msg {
    #[serde(rename = "cosmos-sdk/MsgSend")]
    Send(MsgSend),
}

/// The document a signer commits to. Signed in its key-sorted JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub fee: StdFee,
    pub msgs: Vec<Msg>,
    pub memo: String,
}

/// Self-describing public key: amino type tag plus base64 key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Signature envelope attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: PubKey,
    pub signature: String,
}

/// A fully signed transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdTx {
    pub msg: Vec<Msg>,
    pub fee: StdFee,
    pub memo: String,
    pub signatures: Vec<StdSignature>,
}
