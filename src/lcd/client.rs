use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use straightedge_types::{Coin, StdTx};
use tracing::{debug, error, info};

use super::{AccountSequence, BroadcastResult, ChainGateway};
use crate::config::LcdConfig;
use crate::error::{MigrateError, MigrateResult};
use crate::tx::parse_uint53;

// --- Internal LCD response types ---

#[derive(Deserialize)]
struct LcdBalancesResp {
    #[serde(default)]
    result: Vec<Coin>,
}

#[derive(Deserialize)]
struct LcdAccountResp {
    result: LcdAccountEnvelope,
}

#[derive(Deserialize)]
struct LcdAccountEnvelope {
    value: Option<LcdAccount>,
}

#[derive(Deserialize)]
struct LcdAccount {
    #[serde(default)]
    address: String,
    account_number: Option<LcdUint>,
    sequence: Option<LcdUint>,
}

/// Older gateways render integers as JSON numbers, newer ones as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum LcdUint {
    Number(u64),
    Text(String),
}

impl LcdUint {
    fn parse(&self) -> MigrateResult<u64> {
        match self {
            Self::Number(n) => parse_uint53(&n.to_string()),
            Self::Text(s) => parse_uint53(s),
        }
    }
}

#[derive(Serialize)]
struct BroadcastTxReq<'a> {
    tx: &'a StdTx,
    mode: &'static str,
}

#[derive(Deserialize)]
struct BroadcastTxResp {
    txhash: Option<String>,
    code: Option<u32>,
    raw_log: Option<String>,
}

/// REST client for the chain's legacy LCD gateway.
pub struct LcdClient {
    pub base_url: String,
    http: Client,
}

impl std::fmt::Debug for LcdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcdClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LcdClient {
    pub fn new(config: &LcdConfig) -> MigrateResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> MigrateResult<T> {
        debug!(url = %url, "LCD query");
        let response = self.http.get(url).send().await.map_err(|e| {
            error!(url = %url, "LCD query failed: {}", e);
            MigrateError::Network(e)
        })?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> MigrateResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), body = %body, "LCD returned an error status");
        return Err(MigrateError::Lcd {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl ChainGateway for LcdClient {
    async fn account_balances(&self, address: &str) -> MigrateResult<Vec<Coin>> {
        let url = format!("{}/bank/balances/{}", self.base_url, address);
        let resp: LcdBalancesResp = self.get_json(&url).await?;
        debug!(address = %address, entries = resp.result.len(), "Fetched balances");
        Ok(resp.result)
    }

    async fn account_sequence(&self, address: &str) -> MigrateResult<AccountSequence> {
        let url = format!("{}/auth/accounts/{}", self.base_url, address);
        let resp: LcdAccountResp = self.get_json(&url).await?;

        let account = resp
            .result
            .value
            .filter(|account| !account.address.is_empty())
            .ok_or_else(|| MigrateError::AccountNotFound(address.to_string()))?;

        let account_number = match &account.account_number {
            Some(n) => n.parse()?,
            None => 0,
        };
        let sequence = match &account.sequence {
            Some(n) => n.parse()?,
            None => 0,
        };

        debug!(address = %address, account_number, sequence, "Fetched account sequence");
        Ok(AccountSequence {
            account_number,
            sequence,
        })
    }

    async fn submit_transaction(&self, tx: &StdTx) -> MigrateResult<BroadcastResult> {
        let url = format!("{}/txs", self.base_url);
        let req = BroadcastTxReq { tx, mode: "sync" };

        let response = self.http.post(&url).json(&req).send().await.map_err(|e| {
            error!(url = %url, "Broadcast failed: {}", e);
            MigrateError::Network(e)
        })?;
        let resp: BroadcastTxResp = read_json(response).await?;

        let result = BroadcastResult {
            txhash: resp.txhash.unwrap_or_default(),
            code: resp.code.unwrap_or(0),
            raw_log: resp.raw_log.unwrap_or_default(),
        };

        if !result.is_success() {
            error!(txhash = %result.txhash, code = result.code, raw_log = %result.raw_log, "Transaction rejected");
            return Err(MigrateError::TxRejected {
                code: result.code,
                txhash: result.txhash,
                raw_log: result.raw_log,
            });
        }

        info!(txhash = %result.txhash, "Transaction accepted into mempool");
        Ok(result)
    }
}
