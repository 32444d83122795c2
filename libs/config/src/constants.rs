//! Response codes and harness defaults shared by the ledger clients and the
//! scenarios

/// `ResponseCodeEnum.SUCCESS`
pub const HTS_SUCCESS: i64 = 22;

/// Response codes the harness reports by name
pub mod response_codes {
    pub const SUCCESS: i64 = 22;
    pub const INSUFFICIENT_ACCOUNT_BALANCE: i64 = 28;
    pub const INSUFFICIENT_TOKEN_BALANCE: i64 = 178;
    pub const TOKEN_NOT_ASSOCIATED_TO_ACCOUNT: i64 = 184;
    pub const TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT: i64 = 194;
    pub const SENDER_DOES_NOT_OWN_NFT_SERIAL_NO: i64 = 237;
    pub const SPENDER_DOES_NOT_HAVE_ALLOWANCE: i64 = 292;
    pub const AMOUNT_EXCEEDS_ALLOWANCE: i64 = 293;

    /// Symbolic name, or `None` for codes outside the list above
    pub fn name(code: i64) -> Option<&'static str> {
        let name = match code {
            SUCCESS => "SUCCESS",
            INSUFFICIENT_ACCOUNT_BALANCE => "INSUFFICIENT_ACCOUNT_BALANCE",
            INSUFFICIENT_TOKEN_BALANCE => "INSUFFICIENT_TOKEN_BALANCE",
            TOKEN_NOT_ASSOCIATED_TO_ACCOUNT => "TOKEN_NOT_ASSOCIATED_TO_ACCOUNT",
            TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT => "TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT",
            SENDER_DOES_NOT_OWN_NFT_SERIAL_NO => "SENDER_DOES_NOT_OWN_NFT_SERIAL_NO",
            SPENDER_DOES_NOT_HAVE_ALLOWANCE => "SPENDER_DOES_NOT_HAVE_ALLOWANCE",
            AMOUNT_EXCEEDS_ALLOWANCE => "AMOUNT_EXCEEDS_ALLOWANCE",
            _ => return None,
        };
        Some(name)
    }
}

/// Transaction defaults
pub mod transactions {
    /// Explicit gas ceiling on every state-changing call
    pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

    /// Gas ceiling for token creation, which charges more than a transfer
    pub const TOKEN_CREATE_GAS_LIMIT: u64 = 2_500_000;

    /// Fee sent as `value` with a token creation call (HBAR)
    pub const DEFAULT_TOKEN_CREATE_FEE_HBAR: i64 = 50;
}

/// Token provisioning defaults
pub mod tokens {
    /// `mintToken` accepts at most this many metadata entries per call
    pub const MAX_NFT_MINT_BATCH: usize = 10;

    /// 90 days, the minimum auto-renew period the ledger accepts
    pub const AUTO_RENEW_PERIOD_SECS: i64 = 7_776_000;
}

/// Runner defaults
pub mod runner {
    /// Per-scenario timeout (seconds)
    pub const SUITE_TIMEOUT_SECS: u64 = 3_600;

    /// Report written after a run
    pub const DEFAULT_REPORT_PATH: &str = "test-results.json";

    /// Mirror node lookups retried while the record is ingested
    pub const MIRROR_POLL_ATTEMPTS: u32 = 30;
    pub const MIRROR_POLL_INTERVAL_MS: u64 = 2_000;
}
