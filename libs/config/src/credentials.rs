//! Operator and participant credentials
//!
//! Keys stay hex strings here; the network crate turns them into wallets.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fmt;
use types::AccountId;

pub const OPERATOR_ID: &str = "OPERATOR_ID";
pub const OPERATOR_KEY_HEX: &str = "OPERATOR_KEY_HEX";
pub const ALICE_KEY_HEX: &str = "ALICE_KEY_HEX";
pub const BOB_KEY_HEX: &str = "BOB_KEY_HEX";

/// Secret key material; `Debug` never prints the key
#[derive(Clone, PartialEq, Eq)]
pub struct KeyHex(String);

impl KeyHex {
    /// Accepts 32 bytes of hex with or without a `0x` prefix
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("{} must be a 32-byte hex secp256k1 private key", name);
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }

    /// Hex digits without prefix
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyHex(<redacted>)")
    }
}

/// Everything needed to sign as Treasury, Alice and Bob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Ledger-native id of the operator, who acts as Treasury
    pub operator_id: AccountId,
    pub operator_key: KeyHex,
    pub alice_key: KeyHex,
    pub bob_key: KeyHex,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let vars = [OPERATOR_ID, OPERATOR_KEY_HEX, ALICE_KEY_HEX, BOB_KEY_HEX]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok().map(|value| (name.to_string(), value)))
            .collect();
        Self::from_map(&vars)
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |name: &str| {
            vars.get(name)
                .map(String::as_str)
                .with_context(|| format!("Missing environment variable {}", name))
        };

        let operator_id = get(OPERATOR_ID)?
            .parse::<AccountId>()
            .with_context(|| format!("Invalid {}", OPERATOR_ID))?;
        let operator_key = KeyHex::parse(OPERATOR_KEY_HEX, get(OPERATOR_KEY_HEX)?)?;
        let alice_key = KeyHex::parse(ALICE_KEY_HEX, get(ALICE_KEY_HEX)?)?;
        let bob_key = KeyHex::parse(BOB_KEY_HEX, get(BOB_KEY_HEX)?)?;

        if operator_key == alice_key || operator_key == bob_key || alice_key == bob_key {
            bail!("Treasury, Alice and Bob must use distinct keys");
        }

        Ok(Self {
            operator_id,
            operator_key,
            alice_key,
            bob_key,
        })
    }
}
