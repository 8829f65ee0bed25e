use tracing::debug;

use crate::domain::{Account, AccountDraft, LedgerError, generate_id};
use crate::storage::{AccountRepository, KeyedStore, MemoryStore};

/// Creates and retrieves accounts, enforcing identity uniqueness and
/// required fields. The transaction engine consumes this service's
/// repository, not the service itself.
pub struct AccountService<S = MemoryStore<String, Account>> {
    repo: AccountRepository<S>,
}

impl AccountService {
    /// Service over a fresh in-memory repository.
    pub fn in_memory() -> Self {
        Self::new(AccountRepository::in_memory())
    }
}

impl<S: KeyedStore<String, Account>> AccountService<S> {
    pub fn new(repo: AccountRepository<S>) -> Self {
        Self { repo }
    }

    /// Handle on the backing repository, for wiring the transaction engine.
    pub fn repository(&self) -> AccountRepository<S> {
        self.repo.clone()
    }

    /// Create an account from its candidate shape. Generates an id when
    /// none is supplied; name defaults to empty, balance to zero.
    pub fn create_account(&self, draft: AccountDraft) -> Result<Account, LedgerError> {
        let id = draft.id.unwrap_or_else(generate_id);
        if self.repo.exists(&id) {
            return Err(LedgerError::AccountAlreadyExists(id));
        }

        let direction = draft
            .direction
            .ok_or(LedgerError::MissingField("direction"))?;

        let account = Account::new(
            id,
            draft.name.unwrap_or_default(),
            direction,
            draft.balance.unwrap_or(0),
        );
        self.repo.save(&account);

        debug!(account_id = %account.id, direction = %account.direction, "account created");
        Ok(account)
    }

    pub fn get_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.repo
            .find_by_id(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }
}
