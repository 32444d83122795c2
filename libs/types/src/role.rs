//! Participant roles of the atomic transfer scenario

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three fixed participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Token issuer and sender of every asset
    Treasury,
    /// Approved spender and submitter of the atomic transfer
    Alice,
    /// Receiver
    Bob,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Treasury, Role::Alice, Role::Bob];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Treasury => "Treasury",
            Role::Alice => "Alice",
            Role::Bob => "Bob",
        };
        f.write_str(name)
    }
}
