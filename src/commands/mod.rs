//! Command handlers for the divvy CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod currency;
mod expense;
mod export;
mod init;
mod person;
mod settle;
mod summary;

use crate::model::{Ledger, PersonId};
use crate::{Config, Result};
use anyhow::bail;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use currency::currency;
pub use expense::{add_expense, edit_expense, list_expenses, remove_expense};
pub use export::export;
pub use init::init;
pub use person::{add_person, list_people, remove_person, PersonSummary};
pub use settle::{settle, settle_pay};
pub use summary::{balances, BalanceReport};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to the command line interface.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Finds a person by exact name, falling back to id.
pub(crate) fn resolve_person(ledger: &Ledger, key: &str) -> Result<PersonId> {
    match ledger.find_person(key) {
        Some(person) => Ok(person.id().clone()),
        None => bail!(
            "No person matching '{}' in the group. Add them first with 'divvy add person'.",
            key
        ),
    }
}

/// Snapshots the current ledger file into the backups directory, then writes the new ledger.
pub(crate) async fn save_with_backup(config: &Config, ledger: &Ledger) -> Result<()> {
    config.backup().copy_ledger().await?;
    config.store().save(ledger).await
}
