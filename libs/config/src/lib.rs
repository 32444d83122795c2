//! # HTS Harness Configuration
//!
//! Everything a scenario run needs to know before it touches a network.
//!
//! ## Features
//!
//! - **Constants**: system contract address, response codes, key types
//! - **Network Profiles**: built-in `local`, `testnet` and `previewnet`
//! - **Harness Settings**: layered from defaults, TOML and `HTS_*` variables
//! - **Credentials**: operator and participant keys from the environment
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hts_config::{constants, HarnessConfig};
//!
//! let config = HarnessConfig::load(None)?;
//! let profile = config.resolve_network()?;
//! assert_eq!(constants::HTS_SUCCESS, 22);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod constants;
pub mod credentials;
pub mod harness_config;
pub mod networks;

pub use credentials::Credentials;
pub use harness_config::{HarnessConfig, MirrorSettings};
pub use networks::NetworkProfile;
