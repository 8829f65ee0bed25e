pub mod accounts;
pub mod transactions;

pub use accounts::AccountService;
pub use transactions::TransactionService;
