use parking_lot::Mutex;
use tracing::info;

use crate::domain::{Account, LedgerError, Transaction, TransactionDraft};
use crate::storage::{AccountRepository, KeyedStore, MemoryStore, TransactionRepository};

/// The transaction engine: validates a candidate transaction, applies each
/// entry's signed amount to its account, and persists the result as one
/// logical unit.
pub struct TransactionService<
    TS = MemoryStore<String, Transaction>,
    AS = MemoryStore<String, Account>,
> {
    transactions: TransactionRepository<TS>,
    accounts: AccountRepository<AS>,
    // Serializes concurrent register calls; balances move across several
    // independently-addressed records.
    gate: Mutex<()>,
}

impl TransactionService {
    /// Engine over a fresh in-memory transaction store, posting against the
    /// given account repository.
    pub fn in_memory(accounts: AccountRepository) -> Self {
        Self::new(TransactionRepository::in_memory(), accounts)
    }
}

impl<TS, AS> TransactionService<TS, AS>
where
    TS: KeyedStore<String, Transaction>,
    AS: KeyedStore<String, Account>,
{
    pub fn new(transactions: TransactionRepository<TS>, accounts: AccountRepository<AS>) -> Self {
        Self {
            transactions,
            accounts,
            gate: Mutex::new(()),
        }
    }

    /// Register a transaction: materialize and validate the candidate,
    /// reject duplicates, apply every entry to its account, persist.
    ///
    /// The apply loop runs inside the account store's sandbox: if an entry
    /// references a missing account, balances already applied for earlier
    /// entries are rolled back and nothing is persisted. Entries are
    /// processed in their given order, so the first missing account by
    /// entry order is the one reported.
    pub fn register(&self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        let transaction = Transaction::from_draft(draft)?;
        transaction.validate()?;

        let _serialized = self.gate.lock();

        if self.transactions.exists(&transaction.id) {
            return Err(LedgerError::TransactionAlreadyExists(transaction.id));
        }

        self.accounts.with_sandbox(|accounts| {
            for entry in &transaction.entries {
                let mut account = accounts
                    .get(&entry.account_id)
                    .ok_or_else(|| LedgerError::AccountNotFound(entry.account_id.clone()))?;
                account.apply(entry.amount, entry.direction);
                accounts.set(account.id.clone(), account);
            }
            Ok(())
        })?;

        self.transactions.save(&transaction);
        info!(
            transaction_id = %transaction.id,
            entries = transaction.entries.len(),
            "transaction registered"
        );

        // Re-fetch so the caller sees exactly what was persisted
        self.get_transaction(&transaction.id)
    }

    pub fn get_transaction(&self, id: &str) -> Result<Transaction, LedgerError> {
        self.transactions
            .find_by_id(id)
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))
    }
}
