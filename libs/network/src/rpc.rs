//! JSON-RPC relay ledger
//!
//! One shared HTTP provider for reads. Each submission wraps it in a
//! `SignerMiddleware` for the submitting identity, tagged with the network
//! chain id. Return data and revert reasons come from the mirror node.

use crate::error::LedgerError;
use crate::identity::Identity;
use crate::ledger::{ContractCall, Ledger, ReadCall, Receipt, TxStatus};
use crate::mirror::MirrorClient;
use async_trait::async_trait;
use config::{MirrorSettings, NetworkProfile};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionRequest, H256, U256};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub struct RpcLedger {
    provider: Provider<Http>,
    chain_id: u64,
    mirror: MirrorClient,
}

impl RpcLedger {
    pub fn new(profile: &NetworkProfile, mirror: &MirrorSettings) -> Result<Self, LedgerError> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LedgerError::InvalidUrl {
                url: profile.rpc_url.clone(),
                reason: e.to_string(),
            })?;

        let url: Url = profile
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| LedgerError::InvalidUrl {
                url: profile.rpc_url.clone(),
                reason: e.to_string(),
            })?;
        let provider = Provider::<Http>::new(Http::new_with_client(url, http_client));

        info!("🌐 JSON-RPC relay: {} (chain {})", profile.rpc_url, profile.chain_id);
        info!("🪞 Mirror node: {}", profile.mirror_url);

        Ok(Self {
            provider,
            chain_id: profile.chain_id,
            mirror: MirrorClient::new(&profile.mirror_url, mirror)?,
        })
    }

    /// Chain id reported by the relay, which must match the profile
    pub async fn verify_chain_id(&self) -> Result<(), LedgerError> {
        let reported = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| LedgerError::rpc("eth_chainId", e))?;
        if reported != U256::from(self.chain_id) {
            return Err(LedgerError::Rpc {
                operation: "eth_chainId".to_string(),
                message: format!("relay reports chain {}, profile expects {}", reported, self.chain_id),
            });
        }
        Ok(())
    }

    async fn revert_reason(&self, tx_hash: H256) -> Option<String> {
        match self.mirror.wait_for_contract_result(tx_hash).await {
            Ok(record) => record.revert_reason(),
            Err(e) => {
                warn!("⚠️ No revert reason for 0x{:x}: {}", tx_hash, e);
                None
            }
        }
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn send(&self, signer: &Identity, call: ContractCall) -> Result<Receipt, LedgerError> {
        let client = SignerMiddleware::new(
            self.provider.clone(),
            signer.wallet().clone(),
        );

        let tx = TransactionRequest::new()
            .from(signer.address())
            .to(call.to)
            .data(call.data)
            .value(call.value)
            .gas(call.gas_limit)
            .chain_id(self.chain_id);

        let pending = client
            .send_transaction(tx, None)
            .await
            .map_err(|e| LedgerError::rpc("eth_sendRawTransaction", e))?;
        let tx_hash = *pending;
        info!("📤 {} submitted 0x{:x}", signer.role(), tx_hash);

        let receipt = pending
            .await
            .map_err(|e| LedgerError::rpc("eth_getTransactionReceipt", e))?
            .ok_or(LedgerError::Dropped { tx_hash })?;

        let status = if receipt.status == Some(1u64.into()) {
            TxStatus::Success
        } else {
            TxStatus::Reverted
        };
        debug!(
            "🧾 Receipt 0x{:x}: {:?} block={:?} gas_used={:?}",
            tx_hash, status, receipt.block_number, receipt.gas_used
        );

        let revert_reason = match status {
            TxStatus::Success => None,
            TxStatus::Reverted => self.revert_reason(tx_hash).await,
        };

        Ok(Receipt {
            tx_hash,
            status,
            block_number: receipt.block_number.map(|n| n.as_u64()),
            gas_used: receipt.gas_used,
            revert_reason,
        })
    }

    async fn call(&self, read: ReadCall) -> Result<Vec<u8>, LedgerError> {
        let mut request = TransactionRequest::new().to(read.to).data(read.data);
        if let Some(from) = read.from {
            request = request.from(from);
        }
        let tx: TypedTransaction = request.into();
        let output = self
            .provider
            .call(&tx, None)
            .await
            .map_err(|e| LedgerError::rpc("eth_call", e))?;
        Ok(output.to_vec())
    }

    async fn balance(&self, account: Address) -> Result<U256, LedgerError> {
        self.provider
            .get_balance(account, None)
            .await
            .map_err(|e| LedgerError::rpc("eth_getBalance", e))
    }

    async fn call_result(&self, tx_hash: H256) -> Result<Vec<u8>, LedgerError> {
        self.mirror.wait_for_contract_result(tx_hash).await?.output()
    }
}
