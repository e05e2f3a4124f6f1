//! The `divvy settle` command: suggest payments that settle the group, and record them.

use crate::commands::{save_with_backup, Out};
use crate::engine::{calculate_balances, calculate_settlements};
use crate::model::{Expense, Settlement};
use crate::{Config, Result};
use anyhow::ensure;

/// Suggests the payments that would settle every balance in the group.
///
/// The suggestions are numbered; `divvy settle --pay N` records suggestion N as a completed
/// payment.
pub async fn settle(config: Config) -> Result<Out<Vec<Settlement>>> {
    let ledger = config.store().read().await?;
    let balances = calculate_balances(ledger.expenses(), ledger.people());
    let settlements = calculate_settlements(&balances);
    if settlements.is_empty() {
        return Ok("All settled up! Everyone's balances are even. No settlements needed.".into());
    }

    let currency = config.currency();
    let mut lines: Vec<String> = settlements
        .iter()
        .enumerate()
        .map(|(ix, settlement)| {
            format!(
                "{}. {} pays {} {}",
                ix + 1,
                ledger.person_name(settlement.from()),
                ledger.person_name(settlement.to()),
                currency.format(settlement.amount())
            )
        })
        .collect();
    lines.push("Record one with 'divvy settle --pay N'.".to_string());

    Ok(Out::new(lines.join("\n"), settlements))
}

/// Records suggestion `number` from the current suggestion list as a completed payment.
///
/// The payment is stored as a settlement expense, so the next balance computation zeroes the
/// pair's debt. The list is recomputed here; suggestion numbers are only stable while the
/// ledger does not change.
pub async fn settle_pay(config: Config, number: usize) -> Result<Out<Expense>> {
    let mut ledger = config.store().read().await?;
    let balances = calculate_balances(ledger.expenses(), ledger.people());
    let settlements = calculate_settlements(&balances);
    let count = settlements.len();
    ensure!(
        (1..=count).contains(&number),
        "No settlement suggestion number {number}. There {} {count} suggestion{} right now.",
        if count == 1 { "is" } else { "are" },
        if count == 1 { "" } else { "s" }
    );

    let settlement = &settlements[number - 1];
    let message = format!(
        "Recorded: {} paid {} {}",
        ledger.person_name(settlement.from()),
        ledger.person_name(settlement.to()),
        config.currency().format(settlement.amount())
    );

    let expense = Expense::settlement(
        settlement.from().clone(),
        settlement.to().clone(),
        settlement.amount(),
    );
    ledger.add_expense(expense.clone())?;
    save_with_backup(&config, &ledger).await?;

    Ok(Out::new(message, expense))
}
