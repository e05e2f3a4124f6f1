//! Types that represent the core data model, such as `Person`, `Expense` and the `Ledger` that
//! holds them.

mod amount;
mod category;
mod expense;
mod person;
mod settlement;

pub use amount::{Amount, AmountError};
pub use category::Category;
pub use expense::{
    Expense, ExpenseId, ExpenseSplit, SETTLEMENT_NOTE, SETTLEMENT_TITLE,
};
pub use person::{palette_color, validate_color, Person, PersonId};
pub use settlement::Settlement;

use crate::Result;
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The persisted state of a divvy home: every person and the full, ordered expense history.
///
/// The ledger is the single source of truth. Balances and settlement suggestions are always
/// recomputed from it; nothing derived is ever stored.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Ledger {
    people: Vec<Person>,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn person_by_id(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id() == id)
    }

    /// Looks a person up by exact name, falling back to id. Names are unique within a ledger, so
    /// a name match is unambiguous.
    pub fn find_person(&self, key: &str) -> Option<&Person> {
        self.people
            .iter()
            .find(|p| p.name() == key)
            .or_else(|| self.people.iter().find(|p| p.id().as_str() == key))
    }

    /// The display name for an id, or the id itself when it does not resolve, e.g. a dangling
    /// reference left in a hand-edited ledger file.
    pub fn person_name(&self, id: &PersonId) -> String {
        match self.person_by_id(id) {
            Some(person) => person.name().to_string(),
            None => id.to_string(),
        }
    }

    /// Adds a person, enforcing unique, non-empty names.
    pub fn add_person(&mut self, person: Person) -> Result<()> {
        if person.name().trim().is_empty() {
            bail!("A person needs a name");
        }
        if self.people.iter().any(|p| p.name() == person.name()) {
            bail!("A person named '{}' already exists", person.name());
        }
        self.people.push(person);
        Ok(())
    }

    /// Removes a person. Refused while any expense references them, so the ledger can never hold
    /// a dangling reference of its own making.
    pub fn remove_person(&mut self, id: &PersonId) -> Result<Person> {
        let references = self.expenses.iter().filter(|e| e.references(id)).count();
        if references > 0 {
            let name = self.person_name(id);
            bail!(
                "Cannot remove '{name}': {references} expense{} reference{} them. \
                 Delete those expenses first.",
                if references == 1 { "" } else { "s" },
                if references == 1 { "s" } else { "" }
            );
        }
        match self.people.iter().position(|p| p.id() == id) {
            Some(ix) => Ok(self.people.remove(ix)),
            None => bail!("No person with id '{id}'"),
        }
    }

    /// Appends an expense after checking that the payer and every split member are known people.
    /// The expense itself was validated at construction.
    pub fn add_expense(&mut self, expense: Expense) -> Result<()> {
        self.ensure_known(expense.paid_by())?;
        for split in expense.splits() {
            self.ensure_known(split.person_id())?;
        }
        self.expenses.push(expense);
        Ok(())
    }

    pub fn expense_by_id(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn expense_by_id_mut(&mut self, id: &ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id() == id)
    }

    pub fn remove_expense(&mut self, id: &ExpenseId) -> Result<Expense> {
        match self.expenses.iter().position(|e| e.id() == id) {
            Some(ix) => Ok(self.expenses.remove(ix)),
            None => bail!("No expense with id '{id}'"),
        }
    }

    /// The sum of all expense totals.
    pub fn total_expenses(&self) -> Amount {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// The total this person has paid out across all expenses.
    pub fn person_paid_total(&self, id: &PersonId) -> Amount {
        self.expenses
            .iter()
            .filter(|e| e.paid_by() == id)
            .map(|e| e.amount())
            .sum()
    }

    /// The palette color for the next person to be added.
    pub fn next_color(&self) -> &'static str {
        palette_color(self.people.len())
    }

    fn ensure_known(&self, id: &PersonId) -> Result<()> {
        if self.person_by_id(id).is_none() {
            bail!("No person with id '{id}' exists in this ledger");
        }
        Ok(())
    }
}
