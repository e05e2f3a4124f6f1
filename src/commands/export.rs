//! The `divvy export` command.

use crate::args::{ExportArgs, ExportFormat};
use crate::commands::Out;
use crate::model::Ledger;
use crate::utils;
use crate::{Config, Result};
use anyhow::Context;

/// Exports the full ledger as JSON or CSV, to stdout or to `--output FILE`.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<String>> {
    let ledger = config.store().read().await?;
    let data = match args.format() {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&ledger).context("Unable to serialize the ledger")?
        }
        ExportFormat::Csv => to_csv(&ledger)?,
    };

    match args.output() {
        Some(path) => {
            utils::write(path, &data).await?;
            Ok(Out::new_message(format!(
                "Exported the ledger to '{}'",
                path.display()
            )))
        }
        None => Ok(Out::new_message(data)),
    }
}

/// Renders the ledger as CSV, one row per split, so a three-way expense produces three rows
/// sharing an expense id.
fn to_csv(ledger: &Ledger) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "expense_id",
        "date",
        "title",
        "category",
        "amount",
        "paid_by",
        "split_person",
        "split_amount",
        "note",
    ])?;

    for expense in ledger.expenses() {
        for split in expense.splits() {
            writer.write_record([
                expense.id().to_string(),
                expense.date().format("%Y-%m-%d").to_string(),
                expense.title().to_string(),
                expense.category().to_string(),
                expense.amount().to_string(),
                ledger.person_name(expense.paid_by()),
                ledger.person_name(split.person_id()),
                split.amount().to_string(),
                expense.note().unwrap_or_default().to_string(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .context("Unable to flush the CSV data")?;
    String::from_utf8(bytes).context("The CSV data is not valid UTF-8")
}
