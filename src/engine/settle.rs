//! Greedy settlement planning.

use crate::model::{Amount, PersonId, Settlement};
use std::collections::BTreeMap;
use tracing::warn;

/// Produces a short list of payments that brings every balance to within
/// 0.01 of zero.
///
/// People are split into creditors (balance above 0.01) and debtors (balance
/// below -0.01, tracked by magnitude); anyone already within 0.01 of zero is
/// skipped. Both sides are ordered largest first, ties keeping the map's id
/// order, and matched pairwise: each step transfers the smaller of the two
/// remaining amounts, recorded rounded to cents, and whichever side drops
/// under 0.01 moves on. Matching largest against largest keeps the list to at
/// most one payment fewer than the number of nonzero balances.
///
/// The same input always yields the same payments in the same order, so a
/// numbered suggestion list stays stable across runs.
pub fn calculate_settlements(balances: &BTreeMap<PersonId, Amount>) -> Vec<Settlement> {
    let mut creditors: Vec<(PersonId, Amount)> = Vec::new();
    let mut debtors: Vec<(PersonId, Amount)> = Vec::new();
    for (id, balance) in balances {
        if *balance > Amount::EPSILON {
            creditors.push((id.clone(), *balance));
        } else if *balance < -Amount::EPSILON {
            debtors.push((id.clone(), balance.abs()));
        }
    }
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;
    while i < creditors.len() && j < debtors.len() {
        let amount = creditors[i].1.min(debtors[j].1);
        if amount > Amount::EPSILON {
            settlements.push(Settlement::new(
                debtors[j].0.clone(),
                creditors[i].0.clone(),
                amount.round_to_cents(),
            ));
        }
        creditors[i].1 -= amount;
        debtors[j].1 -= amount;
        if creditors[i].1 < Amount::EPSILON {
            i += 1;
        }
        if debtors[j].1 < Amount::EPSILON {
            j += 1;
        }
    }

    // One side running out with the other still owed means the balances did
    // not sum to zero, which a valid ledger never produces.
    for (id, remaining) in creditors[i..].iter().chain(&debtors[j..]) {
        if *remaining > Amount::EPSILON {
            warn!("{remaining} left unmatched for '{id}', the balances do not sum to zero");
        }
    }

    settlements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate_balances;
    use crate::model::{Category, Expense, ExpenseSplit, Person};

    fn balances(entries: &[(&str, &str)]) -> BTreeMap<PersonId, Amount> {
        entries
            .iter()
            .map(|(id, amount)| (PersonId::new(*id), amount.parse().unwrap()))
            .collect()
    }

    fn pays(settlement: &Settlement) -> (&str, &str, Amount) {
        (
            settlement.from().as_str(),
            settlement.to().as_str(),
            settlement.amount(),
        )
    }

    #[test]
    fn test_no_balances() {
        assert!(calculate_settlements(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_within_a_cent_is_settled() {
        let balances = balances(&[("a", "0.009"), ("b", "-0.009")]);
        assert!(calculate_settlements(&balances).is_empty());
    }

    #[test]
    fn test_exactly_a_cent_is_settled() {
        let balances = balances(&[("a", "0.01"), ("b", "-0.01")]);
        assert!(calculate_settlements(&balances).is_empty());
    }

    #[test]
    fn test_single_pair() {
        let balances = balances(&[("x", "50.00"), ("y", "-50.00")]);
        let settlements = calculate_settlements(&balances);
        assert_eq!(settlements.len(), 1);
        assert_eq!(pays(&settlements[0]), ("y", "x", "50.00".parse().unwrap()));
    }

    #[test]
    fn test_just_over_a_cent_rounds_to_one() {
        let balances = balances(&[("a", "0.011"), ("b", "-0.011")]);
        let settlements = calculate_settlements(&balances);
        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].amount(), "0.01".parse().unwrap());
    }

    #[test]
    fn test_transfer_amount_rounds_half_away_from_zero() {
        let balances = balances(&[("a", "33.335"), ("b", "-33.335")]);
        let settlements = calculate_settlements(&balances);
        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].amount(), "33.34".parse().unwrap());
    }

    #[test]
    fn test_payment_order_is_deterministic() {
        let balances = balances(&[
            ("a", "30.00"),
            ("b", "20.00"),
            ("c", "-25.00"),
            ("d", "-25.00"),
        ]);
        let settlements = calculate_settlements(&balances);
        let observed: Vec<_> = settlements.iter().map(pays).collect();
        assert_eq!(
            observed,
            vec![
                ("c", "a", "25.00".parse().unwrap()),
                ("d", "a", "5.00".parse().unwrap()),
                ("d", "b", "20.00".parse().unwrap()),
            ]
        );
    }

    #[test]
    fn test_largest_creditor_is_paid_first() {
        let balances = balances(&[("a", "10.00"), ("b", "40.00"), ("c", "-50.00")]);
        let settlements = calculate_settlements(&balances);
        let observed: Vec<_> = settlements.iter().map(pays).collect();
        assert_eq!(
            observed,
            vec![
                ("c", "b", "40.00".parse().unwrap()),
                ("c", "a", "10.00".parse().unwrap()),
            ]
        );
    }

    #[test]
    fn test_payment_count_stays_below_nonzero_balances() {
        let balances = balances(&[
            ("a", "60.00"),
            ("b", "-10.00"),
            ("c", "-20.00"),
            ("d", "-30.00"),
        ]);
        let settlements = calculate_settlements(&balances);
        assert_eq!(settlements.len(), 3);
        let observed: Vec<_> = settlements.iter().map(pays).collect();
        assert_eq!(
            observed,
            vec![
                ("d", "a", "30.00".parse().unwrap()),
                ("c", "a", "20.00".parse().unwrap()),
                ("b", "a", "10.00".parse().unwrap()),
            ]
        );
    }

    #[test]
    fn test_lone_creditor_matches_nobody() {
        let balances = balances(&[("a", "5.00")]);
        assert!(calculate_settlements(&balances).is_empty());
    }

    #[test]
    fn test_recording_every_payment_settles_the_group() {
        let people = vec![
            Person::with_id(PersonId::new("a"), "Alice", "#3B82F6"),
            Person::with_id(PersonId::new("b"), "Bob", "#10B981"),
            Person::with_id(PersonId::new("c"), "Carol", "#F59E0B"),
        ];
        let ids: Vec<PersonId> = people.iter().map(|p| p.id().clone()).collect();
        let mut expenses = vec![
            Expense::new(
                "Cabin",
                "100.00".parse().unwrap(),
                ids[0].clone(),
                ExpenseSplit::equal("100.00".parse().unwrap(), &ids).unwrap(),
                Category::Other,
                None,
            )
            .unwrap(),
            Expense::new(
                "Groceries",
                "45.50".parse().unwrap(),
                ids[1].clone(),
                vec![
                    ExpenseSplit::new(ids[1].clone(), "15.17".parse().unwrap()),
                    ExpenseSplit::new(ids[2].clone(), "30.33".parse().unwrap()),
                ],
                Category::Food,
                None,
            )
            .unwrap(),
        ];

        let settlements = calculate_settlements(&calculate_balances(&expenses, &people));
        assert!(!settlements.is_empty());
        for settlement in &settlements {
            expenses.push(Expense::settlement(
                settlement.from().clone(),
                settlement.to().clone(),
                settlement.amount(),
            ));
        }

        let after = calculate_balances(&expenses, &people);
        for balance in after.values() {
            assert!(balance.abs() <= Amount::EPSILON, "left over: {balance}");
        }
        assert!(calculate_settlements(&after).is_empty());
    }
}
