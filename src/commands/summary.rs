//! The `divvy balances` command.

use crate::commands::Out;
use crate::engine::{calculate_balances, net_total};
use crate::model::{Amount, PersonId};
use crate::{Config, Currency, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Every person's net balance plus the group's total spending.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    total_expenses: Amount,
    balances: BTreeMap<PersonId, Amount>,
}

impl BalanceReport {
    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    pub fn balances(&self) -> &BTreeMap<PersonId, Amount> {
        &self.balances
    }
}

/// Shows each person's net balance. A positive balance means the group owes them, a negative one
/// means they owe the group.
///
/// Balance entries whose person is no longer in the group, which can happen when the ledger file
/// is edited by hand, are listed after the group members.
pub async fn balances(config: Config) -> Result<Out<BalanceReport>> {
    let ledger = config.store().read().await?;
    if ledger.people().is_empty() {
        return Ok("No people yet. Add someone with 'divvy add person NAME'.".into());
    }

    let currency = config.currency();
    let balances = calculate_balances(ledger.expenses(), ledger.people());
    let residue = net_total(&balances);
    if residue.abs() > Amount::EPSILON {
        warn!("The balances sum to {residue} instead of zero, the ledger amounts are inconsistent");
    }

    let mut lines = vec![format!(
        "Total expenses: {}",
        currency.format(ledger.total_expenses())
    )];
    for person in ledger.people() {
        let balance = balances.get(person.id()).copied().unwrap_or(Amount::ZERO);
        lines.push(format!("{} {}", person.name(), standing(currency, balance)));
    }
    for (id, balance) in &balances {
        if ledger.person_by_id(id).is_none() {
            lines.push(format!(
                "{} {} (not in the group)",
                id,
                standing(currency, *balance)
            ));
        }
    }

    let report = BalanceReport {
        total_expenses: ledger.total_expenses(),
        balances,
    };
    Ok(Out::new(lines.join("\n"), report))
}

fn standing(currency: Currency, balance: Amount) -> String {
    if balance > Amount::EPSILON {
        format!("is owed {}", currency.format(balance))
    } else if balance < -Amount::EPSILON {
        format!("owes {}", currency.format(balance.abs()))
    } else {
        "is settled up".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_balances_reports_total_and_standings() {
        let env = TestEnv::new().await;
        let ids = env.seed_people(&["Alice", "Bob"]).await;
        env.seed_expense("Dinner", "40.00", &ids[0]).await;

        let out = balances(env.config()).await.unwrap();

        assert!(out.message().contains("Total expenses: $40.00"));
        assert!(out.message().contains("Alice is owed $20.00"));
        assert!(out.message().contains("Bob owes $20.00"));

        let report = out.structure().unwrap();
        assert_eq!(report.total_expenses(), "40.00".parse().unwrap());
        assert_eq!(
            report.balances().get(&ids[0]).copied().unwrap(),
            "20.00".parse().unwrap()
        );
        assert_eq!(
            report.balances().get(&ids[1]).copied().unwrap(),
            "-20.00".parse().unwrap()
        );
    }

    #[tokio::test]
    async fn test_balances_settled_group() {
        let env = TestEnv::new().await;
        env.seed_people(&["Alice", "Bob"]).await;

        let out = balances(env.config()).await.unwrap();

        assert!(out.message().contains("Total expenses: $0.00"));
        assert!(out.message().contains("Alice is settled up"));
        assert!(out.message().contains("Bob is settled up"));
    }

    #[tokio::test]
    async fn test_balances_no_people() {
        let env = TestEnv::new().await;

        let out = balances(env.config()).await.unwrap();

        assert!(out.message().contains("No people yet"));
        assert!(out.structure().is_none());
    }

    #[tokio::test]
    async fn test_balances_sum_to_zero() {
        let env = TestEnv::new().await;
        let ids = env.seed_people(&["Alice", "Bob", "Carol"]).await;
        env.seed_expense("Cabin", "100.00", &ids[0]).await;
        env.seed_expense("Groceries", "45.50", &ids[1]).await;

        let out = balances(env.config()).await.unwrap();

        let report = out.structure().unwrap();
        assert_eq!(net_total(report.balances()), Amount::ZERO);
    }

    #[tokio::test]
    async fn test_balances_includes_dangling_ids_from_a_hand_edited_ledger() {
        let env = TestEnv::new().await;
        let ids = env.seed_people(&["Alice", "Bob"]).await;
        env.seed_expense("Dinner", "40.00", &ids[0]).await;

        // Point Bob's split at an id that is not in the group, as a hand edit of the
        // ledger file might.
        let config = env.config();
        let ledger = config.store().read().await.unwrap();
        let mut value = serde_json::to_value(&ledger).unwrap();
        value["expenses"][0]["splits"][1]["person_id"] =
            serde_json::Value::String("ghost".to_string());
        crate::utils::write(
            config.ledger_path(),
            serde_json::to_string(&value).unwrap(),
        )
        .await
        .unwrap();

        let out = balances(config).await.unwrap();

        assert!(out.message().contains("Alice is owed $20.00"));
        assert!(out.message().contains("Bob is settled up"));
        assert!(out
            .message()
            .contains("ghost owes $20.00 (not in the group)"));
    }
}
