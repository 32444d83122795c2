//! Mirror node REST client
//!
//! Used for the one thing the relay cannot tell us: what a state-changing
//! call returned, and why it reverted.

use crate::error::LedgerError;
use config::MirrorSettings;
use ethers::types::H256;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// `GET /api/v1/contracts/results/{hash}`, fields the harness reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractResultRecord {
    #[serde(default)]
    pub call_result: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ContractResultRecord {
    /// Decoded `call_result` bytes
    pub fn output(&self) -> Result<Vec<u8>, LedgerError> {
        let raw = self.call_result.as_deref().unwrap_or("0x");
        hex::decode(raw.trim_start_matches("0x")).map_err(|e| LedgerError::Malformed {
            what: "call_result".to_string(),
            reason: e.to_string(),
        })
    }

    /// `error_message` as text
    ///
    /// Solidity reverts arrive as ABI-encoded `Error(string)`, system
    /// contract failures as the hex of the status name.
    pub fn revert_reason(&self) -> Option<String> {
        let message = self.error_message.as_deref()?;
        if message.is_empty() {
            return None;
        }
        let decoded = message
            .strip_prefix("0x")
            .and_then(|digits| hex::decode(digits).ok())
            .and_then(|bytes| {
                decode_revert_string(&bytes).or_else(|| {
                    String::from_utf8(bytes)
                        .ok()
                        .filter(|text| !text.is_empty() && text.chars().all(|c| c.is_ascii_graphic()))
                })
            });
        Some(decoded.unwrap_or_else(|| message.to_string()))
    }
}

/// `Error(string)` payload, selector `0x08c379a0`
fn decode_revert_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() < 68 || bytes[..4] != [0x08, 0xc3, 0x79, 0xa0] {
        return None;
    }
    // Length word at 36..68; anything past u64 cannot be a real length
    if bytes[36..60].iter().any(|byte| *byte != 0) {
        return None;
    }
    let len = usize::try_from(u64::from_be_bytes(bytes[60..68].try_into().ok()?)).ok()?;
    let text = bytes.get(68..68usize.checked_add(len)?)?;
    String::from_utf8(text.to_vec()).ok()
}

#[derive(Debug, Clone)]
pub struct MirrorClient {
    http: reqwest::Client,
    base_url: String,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl MirrorClient {
    pub fn new(base_url: &str, settings: &MirrorSettings) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LedgerError::Mirror {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_attempts: settings.poll_attempts.max(1),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
        })
    }

    /// `None` while the mirror node has not ingested the transaction
    pub async fn contract_result(
        &self,
        tx_hash: H256,
    ) -> Result<Option<ContractResultRecord>, LedgerError> {
        let url = format!("{}/api/v1/contracts/results/0x{:x}", self.base_url, tx_hash);
        let mirror_error = |message: String| LedgerError::Mirror {
            url: url.clone(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| mirror_error(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(mirror_error(format!("HTTP {}", response.status())));
        }

        let record = response
            .json::<ContractResultRecord>()
            .await
            .map_err(|e| mirror_error(e.to_string()))?;
        Ok(Some(record))
    }

    /// Poll until the record appears
    pub async fn wait_for_contract_result(
        &self,
        tx_hash: H256,
    ) -> Result<ContractResultRecord, LedgerError> {
        for attempt in 1..=self.poll_attempts {
            if let Some(record) = self.contract_result(tx_hash).await? {
                return Ok(record);
            }
            debug!(
                "⏳ Mirror node has no result for 0x{:x} yet ({}/{})",
                tx_hash, attempt, self.poll_attempts
            );
            if attempt < self.poll_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
        Err(LedgerError::MirrorTimeout {
            what: format!("contract result for 0x{:x}", tx_hash),
            attempts: self.poll_attempts,
        })
    }
}
