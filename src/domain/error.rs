use rust_decimal::Decimal;

use crate::domain::AccountId;

/// Business outcome of a refused withdrawal. Nothing is applied when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Insufficient funds for withdrawal: balance {balance}, requested {requested}")]
    InsufficientFunds {
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Withdrawal would exceed overdraft limit of {limit}: requested {requested}")]
    OverdraftLimitExceeded { limit: Decimal, requested: Decimal },

    #[error("Balance out of range: balance {balance}, requested {requested}")]
    BalanceOverflow {
        balance: Decimal,
        requested: Decimal,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Account {0} already exists")]
    AccountExists(AccountId),

    #[error(transparent)]
    Rejected(#[from] Rejection),
}
