//! error types for the tip jar client

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TipJarError {
    #[error("Enter a valid tip amount (got {input:?})")]
    InvalidAmount { input: String },

    #[error("New owner address is empty")]
    EmptyOwner,

    #[error("Invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: &'static str },

    #[error("No wallet connected")]
    NotConnected,

    #[error("No {coin_type} coins found")]
    NoCoins { coin_type: String },

    #[error("Insufficient balance: need {required} MIST, best coin holds {available} MIST")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Misconfigured: {0}")]
    Misconfigured(String),

    #[error("Timed out after {after:?} while {step}")]
    Timeout { step: &'static str, after: Duration },

    #[error("Ledger request failed: {0:#}")]
    Ledger(anyhow::Error),

    #[error("{0}")]
    Execution(String),

    #[error("Error creating transaction: {0}")]
    Build(String),
}

/// Coarse classification used by the action handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Resource,
    Read,
    Execution,
    Timeout,
    Build,
}

impl TipJarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TipJarError::InvalidAmount { .. }
            | TipJarError::EmptyOwner
            | TipJarError::InvalidAddress { .. }
            | TipJarError::NotConnected
            | TipJarError::Misconfigured(_) => ErrorKind::Validation,
            TipJarError::NoCoins { .. } | TipJarError::InsufficientBalance { .. } => ErrorKind::Resource,
            TipJarError::Ledger(_) => ErrorKind::Read,
            TipJarError::Execution(_) => ErrorKind::Execution,
            TipJarError::Timeout { .. } => ErrorKind::Timeout,
            TipJarError::Build(_) => ErrorKind::Build,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TipJarError::EmptyOwner.kind(), ErrorKind::Validation);
        assert_eq!(
            TipJarError::InsufficientBalance { required: 10, available: 8 }.kind(),
            ErrorKind::Resource
        );
        assert_eq!(
            TipJarError::Timeout { step: "fetching coins", after: Duration::from_secs(1) }.kind(),
            ErrorKind::Timeout
        );
    }

    #[test]
    fn test_ledger_error_keeps_cause() {
        let err = TipJarError::Ledger(anyhow::anyhow!("connection refused"));
        assert!(err.to_string().contains("connection refused"));
    }
}
