//! Signer identities for Treasury, Alice and Bob

use crate::error::LedgerError;
use config::credentials::KeyHex;
use config::Credentials;
use ethers::core::k256::elliptic_curve::sec1::ToEncodedPoint;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use types::{AccountId, Role};

/// One participant: role plus the wallet that signs for it
#[derive(Debug, Clone)]
pub struct Identity {
    role: Role,
    wallet: LocalWallet,
}

impl Identity {
    pub fn from_key_hex(role: Role, key: &KeyHex, chain_id: u64) -> Result<Self, LedgerError> {
        let wallet = key
            .expose()
            .parse::<LocalWallet>()
            .map_err(|e| LedgerError::Signer {
                role,
                message: e.to_string(),
            })?
            .with_chain_id(chain_id);
        Ok(Self { role, wallet })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    pub fn wallet(&self) -> &LocalWallet {
        &self.wallet
    }

    /// 33-byte SEC1 compressed public key, the form token keys take
    pub fn compressed_public_key(&self) -> Vec<u8> {
        self.wallet
            .signer()
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }
}

/// The three scenario accounts
#[derive(Debug, Clone)]
pub struct Participants {
    pub treasury: Identity,
    /// Ledger-native id of the treasury account
    pub treasury_id: AccountId,
    pub alice: Identity,
    pub bob: Identity,
}

impl Participants {
    pub fn from_credentials(credentials: &Credentials, chain_id: u64) -> Result<Self, LedgerError> {
        Ok(Self {
            treasury: Identity::from_key_hex(Role::Treasury, &credentials.operator_key, chain_id)?,
            treasury_id: credentials.operator_id,
            alice: Identity::from_key_hex(Role::Alice, &credentials.alice_key, chain_id)?,
            bob: Identity::from_key_hex(Role::Bob, &credentials.bob_key, chain_id)?,
        })
    }

    pub fn get(&self, role: Role) -> &Identity {
        match role {
            Role::Treasury => &self.treasury,
            Role::Alice => &self.alice,
            Role::Bob => &self.bob,
        }
    }

    /// Role of a known address, used to label log lines
    pub fn role_of(&self, address: Address) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| self.get(*role).address() == address)
    }
}
