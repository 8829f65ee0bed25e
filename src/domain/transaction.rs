use serde::{Deserialize, Serialize};

use super::{AccountId, Direction, LedgerError, generate_id};

pub type TransactionId = String;
pub type EntryId = String;

/// A single posting: one account, one direction, one non-negative amount.
/// Entries are immutable and owned by their transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: i64,
}

impl Entry {
    /// Validating factory. Fails when the account reference or direction is
    /// absent, or when the amount is absent or negative.
    pub fn from_draft(draft: EntryDraft) -> Result<Self, LedgerError> {
        let account_id = draft
            .account_id
            .filter(|id| !id.is_empty())
            .ok_or(LedgerError::MissingField("account_id"))?;

        let direction = draft
            .direction
            .ok_or(LedgerError::MissingField("direction"))?;

        let amount = draft
            .amount
            .ok_or_else(|| LedgerError::InvalidAmount("amount is required".to_string()))?;
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must be non-negative, got {amount}"
            )));
        }

        Ok(Self {
            id: draft.id.unwrap_or_else(generate_id),
            account_id,
            direction,
            amount,
        })
    }

    /// The entry's contribution to a transaction's net: debits count
    /// positive, credits negative.
    pub fn signed_amount(&self) -> i128 {
        match self.direction {
            Direction::Debit => self.amount as i128,
            Direction::Credit => -(self.amount as i128),
        }
    }
}

/// A group of entries applied to the ledger as one logical unit.
/// Immutable once validated; never mutated after being saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub name: Option<String>,
    pub entries: Vec<Entry>,
}

impl Transaction {
    /// Materialize a transaction from its candidate shape, running every
    /// entry through the validating factory. Assigns a generated id when
    /// none is supplied.
    pub fn from_draft(draft: TransactionDraft) -> Result<Self, LedgerError> {
        let entries = draft
            .entries
            .into_iter()
            .map(Entry::from_draft)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: draft.id.unwrap_or_else(generate_id),
            name: draft.name,
            entries,
        })
    }

    /// Net of all entries, debits minus credits. Accumulated in i128 so a
    /// pathological entry list cannot overflow.
    pub fn net(&self) -> i128 {
        self.entries.iter().map(Entry::signed_amount).sum()
    }

    /// Transaction-level invariants: at least two entries, and debits must
    /// equal credits.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.entries.len() < 2 {
            return Err(LedgerError::TooFewEntries(self.entries.len()));
        }

        let net = self.net();
        if net != 0 {
            return Err(LedgerError::Unbalanced(net));
        }

        Ok(())
    }
}

/// Candidate shape for a single entry within a transaction draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub amount: Option<i64>,
}

impl EntryDraft {
    pub fn new(account_id: impl Into<String>, direction: Direction, amount: i64) -> Self {
        Self {
            id: None,
            account_id: Some(account_id.into()),
            direction: Some(direction),
            amount: Some(amount),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Candidate shape for registering a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntryDraft>,
}

impl TransactionDraft {
    pub fn new(entries: Vec<EntryDraft>) -> Self {
        Self {
            id: None,
            name: None,
            entries,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
