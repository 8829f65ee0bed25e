use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{Account, Transaction};

use super::{KeyedStore, MemoryStore};

/// Repository for accounts, over any keyed store. Handles are cheap clones
/// sharing one store, so the transaction engine can consume the account
/// service's repository; the lock serializes individual operations when
/// embedded in a threaded host.
pub struct AccountRepository<S = MemoryStore<String, Account>> {
    store: Arc<Mutex<S>>,
}

impl<S> Clone for AccountRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl AccountRepository {
    /// Repository over a fresh hash-backed store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyedStore<String, Account>> AccountRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<Account> {
        self.store.lock().get(&id.to_string())
    }

    pub fn save(&self, account: &Account) {
        self.store.lock().set(account.id.clone(), account.clone());
    }

    pub fn exists(&self, id: &str) -> bool {
        self.store.lock().contains(&id.to_string())
    }

    /// Run `op` inside the store's sandbox, holding the lock for the whole
    /// span: on error every mutation made by `op` is rolled back.
    pub fn with_sandbox<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut S) -> Result<T, E>,
    {
        self.store.lock().with_sandbox(op)
    }
}

/// Repository for transactions; same shape as [`AccountRepository`].
pub struct TransactionRepository<S = MemoryStore<String, Transaction>> {
    store: Arc<Mutex<S>>,
}

impl<S> Clone for TransactionRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl TransactionRepository {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyedStore<String, Transaction>> TransactionRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<Transaction> {
        self.store.lock().get(&id.to_string())
    }

    pub fn save(&self, transaction: &Transaction) {
        self.store
            .lock()
            .set(transaction.id.clone(), transaction.clone());
    }

    pub fn exists(&self, id: &str) -> bool {
        self.store.lock().contains(&id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Entry};
    use crate::storage::OrderedStore;

    fn sample_account(id: &str) -> Account {
        Account::new(id.to_string(), "Cash".into(), Direction::Debit, 0)
    }

    #[test]
    fn test_account_roundtrip() {
        let repo = AccountRepository::in_memory();
        let account = sample_account("acc-1");

        assert!(!repo.exists("acc-1"));
        repo.save(&account);
        assert!(repo.exists("acc-1"));
        assert_eq!(repo.find_by_id("acc-1"), Some(account));
        assert_eq!(repo.find_by_id("acc-2"), None);
    }

    #[test]
    fn test_transaction_roundtrip() {
        let repo = TransactionRepository::in_memory();
        let transaction = Transaction {
            id: "tx-1".into(),
            name: Some("t".into()),
            entries: vec![
                Entry {
                    id: "e1".into(),
                    account_id: "acc-1".into(),
                    direction: Direction::Debit,
                    amount: 100,
                },
                Entry {
                    id: "e2".into(),
                    account_id: "acc-2".into(),
                    direction: Direction::Credit,
                    amount: 100,
                },
            ],
        };

        assert!(!repo.exists("tx-1"));
        repo.save(&transaction);
        assert!(repo.exists("tx-1"));
        assert_eq!(repo.find_by_id("tx-1"), Some(transaction));
    }

    #[test]
    fn test_save_replaces_existing_record() {
        let repo = AccountRepository::in_memory();
        let mut account = sample_account("acc-1");
        repo.save(&account);

        account.apply(50, Direction::Debit);
        repo.save(&account);

        let fetched = repo.find_by_id("acc-1").unwrap();
        assert_eq!(fetched.balance, 50);
    }

    #[test]
    fn test_clone_shares_the_store() {
        let repo = AccountRepository::in_memory();
        let other = repo.clone();

        repo.save(&sample_account("acc-1"));
        assert!(other.exists("acc-1"));
    }

    #[test]
    fn test_sandbox_rolls_back_saved_accounts() {
        let repo = AccountRepository::in_memory();
        repo.save(&sample_account("acc-1"));

        let result: Result<(), &str> = repo.with_sandbox(|store| {
            let mut account = store.get(&"acc-1".to_string()).unwrap();
            account.apply(100, Direction::Debit);
            store.set(account.id.clone(), account);
            Err("boom")
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(repo.find_by_id("acc-1").unwrap().balance, 0);
    }

    #[test]
    fn test_repository_over_ordered_store() {
        let repo = AccountRepository::new(OrderedStore::new());
        repo.save(&sample_account("acc-1"));
        assert!(repo.exists("acc-1"));
        assert_eq!(repo.find_by_id("acc-1").unwrap().name, "Cash");
    }
}
