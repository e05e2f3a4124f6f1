//! Expenses and their per-person splits.

use crate::model::{Amount, Category, PersonId};
use crate::Result;
use anyhow::{bail, ensure, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Title given to expenses synthesized from confirmed settlements.
pub const SETTLEMENT_TITLE: &str = "Settlement Payment";

/// Note attached to expenses synthesized from confirmed settlements.
pub const SETTLEMENT_NOTE: &str = "Settlement payment";

/// An opaque, unique identifier for an expense.
#[derive(
    Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One person's share of an expense. An expense carries at most one split per person.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExpenseSplit {
    person_id: PersonId,
    amount: Amount,
}

impl ExpenseSplit {
    pub fn new(person_id: PersonId, amount: Amount) -> Self {
        Self { person_id, amount }
    }

    /// Divides `total` evenly across `people`, in whole cents.
    ///
    /// When the total does not divide exactly, the leftover cents go to the earliest listed
    /// people, one cent each, so the shares always sum to exactly `total` and differ from each
    /// other by at most one cent.
    ///
    /// # Errors
    /// - Returns an error if `people` is empty, `total` is negative, or `total` has sub-cent
    ///   precision.
    pub fn equal(total: Amount, people: &[PersonId]) -> Result<Vec<ExpenseSplit>> {
        ensure!(
            !people.is_empty(),
            "An equal split needs at least one participant"
        );
        ensure!(
            !total.is_negative(),
            "Cannot split a negative amount ({total})"
        );
        let cents = total
            .as_cents()
            .with_context(|| format!("An equal split requires a whole-cent amount, got {total}"))?;

        let count = people.len() as i64;
        let base = cents / count;
        let remainder = (cents % count) as usize;

        Ok(people
            .iter()
            .enumerate()
            .map(|(ix, person_id)| {
                let share = base + i64::from(ix < remainder);
                ExpenseSplit::new(person_id.clone(), Amount::from_cents(share))
            })
            .collect())
    }

    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// A shared expense: one payer, a set of per-person shares, and display metadata.
///
/// Construction goes through [`Expense::new`] (or [`Expense::settlement`]), which enforces the
/// invariants the balance engine relies on, most importantly that the split amounts sum to the
/// expense total within one cent. Code that mutates an expense after construction must leave it
/// in a state where [`Expense::validate`] still passes.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    id: ExpenseId,
    title: String,
    amount: Amount,
    paid_by: PersonId,
    splits: Vec<ExpenseSplit>,
    category: Category,
    date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Expense {
    /// Creates a validated expense with a fresh id, timestamped now.
    pub fn new(
        title: impl Into<String>,
        amount: Amount,
        paid_by: PersonId,
        splits: Vec<ExpenseSplit>,
        category: Category,
        note: Option<String>,
    ) -> Result<Self> {
        let expense = Self {
            id: ExpenseId::generate(),
            title: title.into(),
            amount,
            paid_by,
            splits,
            category,
            date: Utc::now(),
            note,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Creates the expense that records a confirmed settlement payment: `from` pays the full
    /// amount and `to` carries the only split, so recomputing balances moves both people toward
    /// zero by exactly `amount`.
    pub fn settlement(from: PersonId, to: PersonId, amount: Amount) -> Self {
        Self {
            id: ExpenseId::generate(),
            title: SETTLEMENT_TITLE.to_string(),
            amount,
            paid_by: from,
            splits: vec![ExpenseSplit::new(to, amount)],
            category: Category::Other,
            date: Utc::now(),
            note: Some(SETTLEMENT_NOTE.to_string()),
        }
    }

    /// Checks the invariants enforced at the input boundary. The balance engine itself never
    /// validates; a malformed expense must be rejected here, before it enters the ledger.
    ///
    /// # Errors
    /// - The title is empty or whitespace.
    /// - The total is negative.
    /// - There are no splits, a split is negative, or a person appears in two splits.
    /// - The split amounts do not sum to the total within 0.01.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.title.trim().is_empty(), "An expense needs a title");
        ensure!(
            !self.amount.is_negative(),
            "The expense amount cannot be negative, got {}",
            self.amount
        );
        ensure!(
            !self.splits.is_empty(),
            "An expense needs at least one split"
        );

        let mut seen = BTreeSet::new();
        for split in &self.splits {
            ensure!(
                !split.amount().is_negative(),
                "The split for '{}' cannot be negative, got {}",
                split.person_id(),
                split.amount()
            );
            if !seen.insert(split.person_id()) {
                bail!(
                    "The person '{}' appears in more than one split",
                    split.person_id()
                );
            }
        }

        let split_total = self.split_total();
        let difference = (split_total - self.amount).abs();
        if difference >= Amount::EPSILON {
            bail!(
                "The splits sum to {split_total} but the expense amount is {}; \
                 they must match within {}",
                self.amount,
                Amount::EPSILON
            );
        }
        Ok(())
    }

    /// The sum of the split amounts.
    pub fn split_total(&self) -> Amount {
        self.splits.iter().map(|s| s.amount()).sum()
    }

    /// True if this expense names `person` as the payer or in any split.
    pub fn references(&self, person: &PersonId) -> bool {
        self.paid_by == *person || self.splits.iter().any(|s| s.person_id() == person)
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn paid_by(&self) -> &PersonId {
        &self.paid_by
    }

    pub fn splits(&self) -> &[ExpenseSplit] {
        &self.splits
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note;
    }

    pub fn set_paid_by(&mut self, person: PersonId) {
        self.paid_by = person;
    }

    /// Replaces the amount and splits together, re-checking the invariants. The two always change
    /// as a unit; editing one without the other would break the split-sum invariant.
    pub fn set_amount_and_splits(
        &mut self,
        amount: Amount,
        splits: Vec<ExpenseSplit>,
    ) -> Result<()> {
        self.amount = amount;
        self.splits = splits;
        self.validate()
    }
}
