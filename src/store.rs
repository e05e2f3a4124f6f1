//! This module is responsible for reading and writing the JSON ledger file.

use crate::model::Ledger;
use crate::{utils, Result};
use anyhow::{bail, Context};
use std::path::PathBuf;

/// Handle to the ledger file at `$DIVVY_HOME/ledger.json`. The whole document
/// is read and rewritten on every change, which is plenty for a file that
/// holds one group's expenses.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    /// - Validates that no file currently exists at `path`
    /// - Writes an empty ledger to `path`
    /// - Returns a constructed `Store` object for further operations
    pub(crate) async fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            bail!("A ledger file already exists at '{}'", path.display());
        }
        let store = Self { path };
        store.save(&Ledger::new()).await?;
        Ok(store)
    }

    /// - Validates that there is a ledger file at `path`
    /// - Returns a constructed `Store` object for further operations
    pub(crate) async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            bail!("The ledger file is missing '{}'", path.display());
        }
        Ok(Self { path })
    }

    /// Reads and parses the ledger file.
    pub(crate) async fn read(&self) -> Result<Ledger> {
        let content = utils::read(&self.path).await?;
        serde_json::from_str(&content).with_context(|| {
            format!("Unable to parse the ledger file at {}", self.path.display())
        })
    }

    /// Serializes the ledger and writes it to disk.
    pub(crate) async fn save(&self, ledger: &Ledger) -> Result<()> {
        let data =
            serde_json::to_string_pretty(ledger).context("Unable to serialize the ledger")?;
        utils::write(&self.path, data)
            .await
            .context("Unable to write the ledger file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Expense, ExpenseSplit, Person};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_init_writes_an_empty_ledger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let store = Store::init(&path).await.unwrap();
        assert!(path.is_file());
        let ledger = store.read().await.unwrap();
        assert!(ledger.people().is_empty());
        assert!(ledger.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_store_init_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        Store::init(&path).await.unwrap();
        let result = Store::init(&path).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("already exists"));
    }

    #[tokio::test]
    async fn test_store_load_requires_the_file() {
        let dir = TempDir::new().unwrap();
        let result = Store::load(dir.path().join("ledger.json")).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::init(dir.path().join("ledger.json")).await.unwrap();

        let mut ledger = store.read().await.unwrap();
        let alice = Person::new("Alice", "#3B82F6");
        let alice_id = alice.id().clone();
        ledger.add_person(alice).unwrap();
        let expense = Expense::new(
            "Coffee",
            "4.50".parse().unwrap(),
            alice_id.clone(),
            vec![ExpenseSplit::new(alice_id, "4.50".parse().unwrap())],
            Category::Food,
            Some("flat white".to_string()),
        )
        .unwrap();
        ledger.add_expense(expense).unwrap();
        store.save(&ledger).await.unwrap();

        let reloaded = store.read().await.unwrap();
        assert_eq!(ledger, reloaded);
    }

    #[tokio::test]
    async fn test_store_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        crate::utils::write(&path, "not json").await.unwrap();
        let store = Store::load(&path).await.unwrap();
        let result = store.read().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unable to parse"));
    }
}
