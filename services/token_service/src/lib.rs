//! # Token Service Steps
//!
//! The building blocks of the atomic transfer scenario, each one a
//! verify-before / submit / verify-after unit over a [`ScenarioContext`]:
//!
//! ```text
//! provisioning → allowance (HBAR, FT, NFT) → association (FT, NFT) → atomic_transfer
//!      ↓                 ↓                          ↓                       ↓
//! create + mint   hbarApprove / approve        HRC-719 associate     cryptoTransfer on 0x167
//! ```
//!
//! Steps run strictly in sequence. A failed step returns a [`StepError`] and
//! nothing is retried.

pub mod allowance;
pub mod association;
pub mod atomic_transfer;
pub mod context;
pub mod error;
pub mod provisioning;
pub mod verification;


pub use atomic_transfer::{AtomicTransferPlan, BalanceSnapshot};
pub use context::ScenarioContext;
pub use error::{Result, StepError};
pub use provisioning::{SystemContractProvisioner, TokenProvisioner};
pub use verification::{Check, StepOutcome};
