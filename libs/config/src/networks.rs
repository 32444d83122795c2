//! Built-in network profiles

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Endpoints and identifiers of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub name: String,
    /// JSON-RPC relay
    pub rpc_url: String,
    pub chain_id: u64,
    /// Consensus node (gRPC), kept for reporting
    pub node_url: String,
    pub node_id: String,
    /// Mirror node REST base, without `/api/v1`
    pub mirror_url: String,
}

fn profile(
    name: &str,
    rpc_url: &str,
    chain_id: u64,
    node_url: &str,
    mirror_url: &str,
) -> NetworkProfile {
    NetworkProfile {
        name: name.to_string(),
        rpc_url: rpc_url.to_string(),
        chain_id,
        node_url: node_url.to_string(),
        node_id: "0.0.3".to_string(),
        mirror_url: mirror_url.to_string(),
    }
}

pub static BUILT_IN: Lazy<HashMap<String, NetworkProfile>> = Lazy::new(|| {
    [
        profile(
            "local",
            "http://localhost:7546",
            298,
            "127.0.0.1:50211",
            "http://localhost:5551",
        ),
        profile(
            "testnet",
            "https://testnet.hashio.io/api",
            296,
            "0.testnet.hedera.com:50211",
            "https://testnet.mirrornode.hedera.com",
        ),
        profile(
            "previewnet",
            "https://previewnet.hashio.io/api",
            297,
            "0.previewnet.hedera.com:50211",
            "https://previewnet.mirrornode.hedera.com",
        ),
    ]
    .into_iter()
    .map(|profile| (profile.name.clone(), profile))
    .collect()
});

pub fn built_in(name: &str) -> Option<&'static NetworkProfile> {
    BUILT_IN.get(name)
}
