pub mod application;
pub mod domain;
pub mod storage;

pub use application::{AccountService, TransactionService};
pub use domain::*;
pub use storage::{
    AccountRepository, KeyedStore, MemoryStore, OrderedStore, TransactionRepository,
};
