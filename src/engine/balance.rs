//! Net balance computation over a list of expenses.

use crate::model::{Amount, Expense, Person, PersonId};
use std::collections::BTreeMap;

/// Computes each person's net balance: the total they paid minus the total
/// they owe across every split they appear in. Positive means the group owes
/// them money, negative means they owe the group.
///
/// Every person in `people` gets an entry, zero if no expense touches them.
/// Ids that appear only inside an expense (a payer or split member that was
/// since removed from `people`, or external data) still accumulate, so the
/// key set is the union of both sources. Amounts are summed exactly, without
/// rounding.
pub fn calculate_balances(
    expenses: &[Expense],
    people: &[Person],
) -> BTreeMap<PersonId, Amount> {
    let mut balances: BTreeMap<PersonId, Amount> = people
        .iter()
        .map(|person| (person.id().clone(), Amount::ZERO))
        .collect();
    for expense in expenses {
        *balances
            .entry(expense.paid_by().clone())
            .or_insert(Amount::ZERO) += expense.amount();
        for split in expense.splits() {
            *balances
                .entry(split.person_id().clone())
                .or_insert(Amount::ZERO) -= split.amount();
        }
    }
    balances
}

/// Sums a balance map. Whenever every expense's splits add up to its amount,
/// this is exactly zero; a nonzero result means some expense leaks money.
pub fn net_total(balances: &BTreeMap<PersonId, Amount>) -> Amount {
    balances.values().copied().sum()
}
