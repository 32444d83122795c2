//! Harness Configuration Module
//!
//! Layering, lowest precedence first: built-in defaults, an optional TOML
//! file (`config/harness.toml` unless a path is given), `HTS_*` environment
//! variables with `__` between nested keys, and finally `HEDERA_NETWORK`
//! for the network name.

use crate::constants::{runner, transactions};
use crate::networks::{self, NetworkProfile};
use anyhow::{anyhow, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_CONFIG_FILE: &str = "config/harness.toml";

/// Top-level harness settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// Name of the profile to run against
    pub network: String,
    /// Per-network overrides, or complete profiles for custom networks
    #[serde(default)]
    pub networks: HashMap<String, NetworkOverride>,
    pub gas_limit: u64,
    pub token_create_gas_limit: u64,
    pub token_create_fee_hbar: i64,
    pub suite_timeout_secs: u64,
    pub report_path: String,
    pub mirror: MirrorSettings,
}

/// Partial network profile; unset fields fall back to the built-in profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkOverride {
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
    pub node_url: Option<String>,
    pub node_id: Option<String>,
    pub mirror_url: Option<String>,
}

/// How long to wait for the mirror node to ingest a record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MirrorSettings {
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            network: "testnet".to_string(),
            networks: HashMap::new(),
            gas_limit: transactions::DEFAULT_GAS_LIMIT,
            token_create_gas_limit: transactions::TOKEN_CREATE_GAS_LIMIT,
            token_create_fee_hbar: transactions::DEFAULT_TOKEN_CREATE_FEE_HBAR,
            suite_timeout_secs: runner::SUITE_TIMEOUT_SECS,
            report_path: runner::DEFAULT_REPORT_PATH.to_string(),
            mirror: MirrorSettings::default(),
        }
    }
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            poll_attempts: runner::MIRROR_POLL_ATTEMPTS,
            poll_interval_ms: runner::MIRROR_POLL_INTERVAL_MS,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, None)
    }

    /// Same layering, with `env` standing in for the process environment
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        Self::build(path, Some(env))
    }

    fn build(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults =
            Config::try_from(&HarnessConfig::default()).context("Failed to encode defaults")?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match path {
            Some(path) => {
                info!("📄 Loading harness config: {:?}", path);
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let hedera_network = match &env {
            Some(vars) => vars.get("HEDERA_NETWORK").cloned(),
            None => std::env::var("HEDERA_NETWORK").ok(),
        };

        builder = builder
            .add_source(
                Environment::with_prefix("HTS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("network", hedera_network)
            .context("Failed to apply HEDERA_NETWORK")?;

        let config = builder.build().context("Failed to build configuration")?;

        let mut harness: HarnessConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        harness.expand_env_vars()?;

        debug!("Harness configuration: {:?}", harness);
        Ok(harness)
    }

    /// Replace the network name, as the `--network` flag does
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    /// Built-in profile of the selected network with overrides applied
    pub fn resolve_network(&self) -> Result<NetworkProfile> {
        let overrides = self.networks.get(&self.network).cloned().unwrap_or_default();

        let base = match networks::built_in(&self.network) {
            Some(profile) => profile.clone(),
            None => {
                // Custom network: every endpoint must come from configuration
                let missing = |field: &str| {
                    anyhow!(
                        "Unknown network '{}' has no built-in profile and no '{}' configured",
                        self.network,
                        field
                    )
                };
                NetworkProfile {
                    name: self.network.clone(),
                    rpc_url: overrides.rpc_url.clone().ok_or_else(|| missing("rpc_url"))?,
                    chain_id: overrides.chain_id.ok_or_else(|| missing("chain_id"))?,
                    node_url: overrides.node_url.clone().unwrap_or_default(),
                    node_id: overrides
                        .node_id
                        .clone()
                        .unwrap_or_else(|| "0.0.3".to_string()),
                    mirror_url: overrides
                        .mirror_url
                        .clone()
                        .ok_or_else(|| missing("mirror_url"))?,
                }
            }
        };

        Ok(NetworkProfile {
            name: base.name,
            rpc_url: overrides.rpc_url.unwrap_or(base.rpc_url),
            chain_id: overrides.chain_id.unwrap_or(base.chain_id),
            node_url: overrides.node_url.unwrap_or(base.node_url),
            node_id: overrides.node_id.unwrap_or(base.node_id),
            mirror_url: overrides.mirror_url.unwrap_or(base.mirror_url),
        })
    }

    /// Expand `${VAR}` references in string values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let expanded = shellexpand::env(&self.report_path)
            .context("Failed to expand report path")?;
        self.report_path = expanded.to_string();

        for (name, network) in &mut self.networks {
            for url in [
                &mut network.rpc_url,
                &mut network.node_url,
                &mut network.mirror_url,
            ] {
                if let Some(value) = url {
                    let expanded = shellexpand::env(value)
                        .with_context(|| format!("Failed to expand URL of network '{}'", name))?;
                    *value = expanded.to_string();
                }
            }
        }
        Ok(())
    }
}
