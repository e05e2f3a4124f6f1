//! Expense command handlers.

use crate::args::{
    AddExpenseArgs, EditExpenseArgs, ListExpensesArgs, RemoveExpenseArgs, SplitMethod,
};
use crate::commands::{resolve_person, save_with_backup, Out};
use crate::model::{Amount, Expense, ExpenseId, ExpenseSplit, Ledger};
use crate::{Config, Result};
use anyhow::{bail, ensure, Context};

/// Records a new expense in the ledger.
///
/// The amount is divided according to `--split`: "equal" divides it among `--among` (or everyone
/// when the flag is absent) with any leftover cents going to the people listed first, "custom"
/// takes one `--share NAME=AMOUNT` per person and requires the shares to add up to the total.
///
/// # Errors
/// - Returns an error if the group is empty, a named person does not exist, a share is
///   malformed, or the splits break an expense invariant.
pub async fn add_expense(config: Config, args: AddExpenseArgs) -> Result<Out<Expense>> {
    let mut ledger = config.store().read().await?;
    ensure!(
        !ledger.people().is_empty(),
        "There is nobody in the group yet. Add people with 'divvy add person' before \
         recording expenses."
    );

    let paid_by = resolve_person(&ledger, args.paid_by())?;
    let splits = build_splits(
        &ledger,
        args.split(),
        args.amount(),
        args.among(),
        args.shares(),
    )?;
    let expense = Expense::new(
        args.title(),
        args.amount(),
        paid_by,
        splits,
        args.category(),
        args.note().map(String::from),
    )?;

    let message = format!(
        "Recorded '{}' for {} paid by {}. ID: {}",
        expense.title(),
        config.currency().format(expense.amount()),
        ledger.person_name(expense.paid_by()),
        expense.id()
    );
    ledger.add_expense(expense.clone())?;
    save_with_backup(&config, &ledger).await?;

    Ok(Out::new(message, expense))
}

/// Edits an expense in place.
///
/// Title, category, payer and note can change on their own. Changing the amount redistributes
/// everyone's shares, so it requires respecifying the split with `--split` (plus `--among` or
/// `--share`); a new split may also be given without changing the amount.
///
/// # Errors
/// - Returns an error if the expense or a named person does not exist, if `--amount` comes
///   without `--split`, or if the edited expense breaks an invariant.
pub async fn edit_expense(config: Config, args: EditExpenseArgs) -> Result<Out<Expense>> {
    let mut ledger = config.store().read().await?;

    let id = ExpenseId::new(args.id());
    let current_amount = ledger
        .expense_by_id(&id)
        .with_context(|| format!("No expense with id '{}'", args.id()))?
        .amount();

    if args.amount().is_some() && args.split().is_none() {
        bail!(
            "Changing the amount redivides everyone's shares. Respecify the split with \
             '--split equal' or '--split custom'."
        );
    }
    if args.split().is_none() && (args.among().is_some() || !args.shares().is_empty()) {
        bail!("--among and --share only make sense together with --split");
    }

    let new_payer = match args.paid_by() {
        Some(key) => Some(resolve_person(&ledger, key)?),
        None => None,
    };
    let new_split = match args.split() {
        Some(method) => {
            let amount = args.amount().unwrap_or(current_amount);
            Some((
                amount,
                build_splits(&ledger, method, amount, args.among(), args.shares())?,
            ))
        }
        None => None,
    };

    let expense = ledger
        .expense_by_id_mut(&id)
        .with_context(|| format!("No expense with id '{}'", args.id()))?;
    if let Some(title) = args.title() {
        expense.set_title(title);
    }
    if let Some(category) = args.category() {
        expense.set_category(category);
    }
    if let Some(note) = args.note() {
        // An empty string clears the note.
        expense.set_note((!note.is_empty()).then(|| note.to_string()));
    }
    if let Some(payer) = new_payer {
        expense.set_paid_by(payer);
    }
    if let Some((amount, splits)) = new_split {
        expense.set_amount_and_splits(amount, splits)?;
    }
    expense.validate()?;
    let updated = expense.clone();
    save_with_backup(&config, &ledger).await?;

    let message = format!("Updated '{}'", updated.title());
    Ok(Out::new(message, updated))
}

/// Deletes an expense from the ledger.
pub async fn remove_expense(config: Config, args: RemoveExpenseArgs) -> Result<Out<Expense>> {
    let mut ledger = config.store().read().await?;

    let expense = ledger.remove_expense(&ExpenseId::new(args.id()))?;
    save_with_backup(&config, &ledger).await?;

    let message = format!(
        "Deleted '{}' ({})",
        expense.title(),
        config.currency().format(expense.amount())
    );
    Ok(Out::new(message, expense))
}

/// Lists expenses, newest first, optionally limited to the most recent `--limit`.
pub async fn list_expenses(config: Config, args: ListExpensesArgs) -> Result<Out<Vec<Expense>>> {
    let ledger = config.store().read().await?;
    if ledger.expenses().is_empty() {
        return Ok("No expenses yet. Record one with 'divvy add expense'.".into());
    }

    let currency = config.currency();
    let mut expenses: Vec<Expense> = ledger.expenses().to_vec();
    expenses.reverse();
    if let Some(limit) = args.limit() {
        expenses.truncate(limit);
    }

    let lines: Vec<String> = expenses
        .iter()
        .map(|expense| {
            format!(
                "{} | {} | '{}' paid by {} | {} | {}",
                expense.date().format("%Y-%m-%d"),
                currency.format(expense.amount()),
                expense.title(),
                ledger.person_name(expense.paid_by()),
                expense.category(),
                expense.id()
            )
        })
        .collect();

    Ok(Out::new(lines.join("\n"), expenses))
}

/// Builds the split list for an expense from the CLI flags.
fn build_splits(
    ledger: &Ledger,
    method: SplitMethod,
    total: Amount,
    among: Option<&[String]>,
    shares: &[String],
) -> Result<Vec<ExpenseSplit>> {
    match method {
        SplitMethod::Equal => {
            ensure!(
                shares.is_empty(),
                "--share sets a custom share, use it with '--split custom'"
            );
            let participants = match among {
                Some(names) => {
                    let mut ids = Vec::new();
                    for name in names {
                        ids.push(resolve_person(ledger, name.trim())?);
                    }
                    ids
                }
                None => ledger.people().iter().map(|p| p.id().clone()).collect(),
            };
            ExpenseSplit::equal(total, &participants)
        }
        SplitMethod::Custom => {
            ensure!(
                among.is_none(),
                "--among selects people for an equal split, use it with '--split equal'"
            );
            ensure!(
                !shares.is_empty(),
                "A custom split needs at least one --share NAME=AMOUNT"
            );
            let mut splits = Vec::new();
            for share in shares {
                let (name, amount) = share
                    .split_once('=')
                    .with_context(|| format!("Invalid share '{share}': expected NAME=AMOUNT"))?;
                let amount: Amount = amount
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid amount in share '{share}'"))?;
                splits.push(ExpenseSplit::new(
                    resolve_person(ledger, name.trim())?,
                    amount,
                ));
            }
            Ok(splits)
        }
    }
}
