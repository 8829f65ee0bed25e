use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Transaction already exists: {0}")]
    TransactionAlreadyExists(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("A transaction must have at least two entries (got {0})")]
    TooFewEntries(usize),

    #[error("Entries do not balance (debits must equal credits): net {0}")]
    Unbalanced(i128),
}
