use serde::{Deserialize, Serialize};

pub type AccountId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increases when debited (assets, expenses)
    Debit,
    /// Increases when credited (liabilities, income, equity)
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debit" => Some(Direction::Debit),
            "credit" => Some(Direction::Credit),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An account with a running balance, kept in integer units.
/// The balance only ever changes through [`Account::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub direction: Direction,
    pub balance: i64,
}

impl Account {
    pub fn new(id: AccountId, name: String, direction: Direction, balance: i64) -> Self {
        Self {
            id,
            name,
            direction,
            balance,
        }
    }

    /// Apply a posted amount: entries in the account's own direction add,
    /// entries in the opposite direction subtract.
    pub fn apply(&mut self, amount: i64, direction: Direction) {
        if direction == self.direction {
            self.balance += amount;
        } else {
            self.balance -= amount;
        }
    }
}

/// Candidate shape for creating an account. Every field is optional; the
/// service generates an id and fills in defaults for name and balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub balance: Option<i64>,
}

impl AccountDraft {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Default::default()
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

    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = Some(balance);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_roundtrip() {
        for dir in [Direction::Debit, Direction::Credit] {
            let s = dir.as_str();
            let parsed = Direction::from_str(s).unwrap();
            assert_eq!(dir, parsed);
        }
    }

    #[test]
    fn test_apply_same_direction_increases_balance() {
        let mut account = Account::new("acc-1".into(), "Cash".into(), Direction::Debit, 0);
        account.apply(100, Direction::Debit);
        assert_eq!(account.balance, 100);

        let mut account = Account::new("acc-2".into(), "Revenue".into(), Direction::Credit, 0);
        account.apply(250, Direction::Credit);
        assert_eq!(account.balance, 250);
    }

    #[test]
    fn test_apply_opposite_direction_decreases_balance() {
        let mut account = Account::new("acc-1".into(), "Cash".into(), Direction::Debit, 100);
        account.apply(40, Direction::Credit);
        assert_eq!(account.balance, 60);

        let mut account = Account::new("acc-2".into(), "Revenue".into(), Direction::Credit, 100);
        account.apply(100, Direction::Debit);
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Debit).unwrap();
        assert_eq!(json, "\"debit\"");
        let parsed: Direction = serde_json::from_str("\"credit\"").unwrap();
        assert_eq!(parsed, Direction::Credit);
    }
}
