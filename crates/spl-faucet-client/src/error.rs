//! Error taxonomy for faucet client operations.

use solana_program::pubkey::Pubkey;
use thiserror::Error;

pub type FaucetResult<T> = Result<T, FaucetError>;

/// Failures surfaced by the remote ledger reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("malformed account {address}: {reason}")]
    Malformed { address: Pubkey, reason: String },

    #[error("remote call cancelled")]
    Cancelled,
}

impl LedgerError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(address: Pubkey, reason: impl Into<String>) -> Self {
        Self::Malformed { address, reason: reason.into() }
    }
}

/// Failures of the public faucet operations.
///
/// An operation either returns a complete unsigned transaction or exactly one
/// of these. Absence of a token account is not an error.
#[derive(Debug, Error)]
pub enum FaucetError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("failed to resolve token account {address}: {source}")]
    ResolutionFailed {
        address: Pubkey,
        #[source]
        source: LedgerError,
    },

    #[error("network error: {0}")]
    Network(#[source] LedgerError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("owner {0} is off curve; off-curve owners are not allowed here")]
    OwnerOffCurve(Pubkey),

    #[error("failed to compile message: {0}")]
    MessageCompile(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FaucetError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Wrap a failed account existence read.
    pub fn resolution(address: Pubkey, source: LedgerError) -> Self {
        match source {
            LedgerError::Cancelled => Self::Cancelled,
            source => Self::ResolutionFailed { address, source },
        }
    }
}

impl From<LedgerError> for FaucetError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Cancelled => Self::Cancelled,
            other => Self::Network(other),
        }
    }
}
