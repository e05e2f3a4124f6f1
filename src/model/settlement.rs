//! A suggested payment between two people.

use crate::model::{Amount, PersonId};
use serde::{Deserialize, Serialize};

/// A directed payment instruction: `from` pays `to` the given (always positive) amount.
///
/// Settlements are derived values. They are never persisted; confirming one turns it into a
/// regular expense (see `Expense::settlement`) and the suggestion list is recomputed from the
/// ledger on the next read.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settlement {
    from: PersonId,
    to: PersonId,
    amount: Amount,
}

impl Settlement {
    pub fn new(from: PersonId, to: PersonId, amount: Amount) -> Self {
        Self { from, to, amount }
    }

    /// The person who owes money.
    pub fn from(&self) -> &PersonId {
        &self.from
    }

    /// The person who is owed money.
    pub fn to(&self) -> &PersonId {
        &self.to
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let settlement = Settlement::new(
            PersonId::new("debtor"),
            PersonId::new("creditor"),
            Amount::from_cents(2500),
        );
        let json = serde_json::to_string(&settlement).unwrap();
        assert!(json.contains("\"from\":\"debtor\""));
        assert!(json.contains("\"to\":\"creditor\""));
        let parsed: Settlement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settlement);
    }
}
