//! Backup management for the ledger file.
//!
//! Every command that rewrites the ledger snapshots the current file first,
//! so a bad edit is always one copy away from recovery.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;

/// Prefix for ledger backup files.
const LEDGER: &str = "ledger";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    ledger_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            ledger_path: config.ledger_path().to_path_buf(),
        }
    }

    /// Copies the ledger file to the backups directory.
    ///
    /// The filename format is `ledger.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file.
    pub async fn copy_ledger(&self) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(LEDGER, &date).await?;
        let filename = format!("{LEDGER}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        utils::copy(&self.ledger_path, &path).await?;

        self.rotate(LEDGER).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let pattern_start = format!("{prefix}.{date}-");
        let mut max_seq: u32 = 0;

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            if name.starts_with(&pattern_start) {
                if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                    max_seq = max_seq.max(seq);
                }
            }
        }

        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        // Collect all matching backup files
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().to_string();

            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        // Delete oldest files if we have more than backup_copies
        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove(&path).await?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.json
    let expected_start = format!("{prefix}.{date}-");

    if !filename.starts_with(&expected_start) {
        return None;
    }

    let remainder = &filename[expected_start.len()..];
    let seq_str = remainder.strip_suffix(".json")?;
    seq_str.parse().ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("ledger.2026-03-14-001.json", "ledger", "2026-03-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("ledger.2026-03-14-042.json", "ledger", "2026-03-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("config.2026-03-14-001.json", "ledger", "2026-03-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("ledger.2026-03-13-001.json", "ledger", "2026-03-14"),
            None
        );
        // Missing extension
        assert_eq!(
            parse_sequence_number("ledger.2026-03-14-001", "ledger", "2026-03-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("ledger.2026-03-14-001.json", "ledger"));
        assert!(!is_backup_file("config.2026-03-14-001.json", "ledger"));
        assert!(!is_backup_file("ledger.2026-03-14-001", "ledger"));
    }

    #[tokio::test]
    async fn test_copy_ledger_sequences_and_rotates() {
        let dir = TempDir::new().unwrap();
        let backups_dir = dir.path().join(".backups");
        let ledger_path = dir.path().join("ledger.json");
        utils::make_dir(&backups_dir).await.unwrap();
        utils::write(&ledger_path, "{}").await.unwrap();

        let backup = Backup {
            backups_dir: backups_dir.clone(),
            backup_copies: 2,
            ledger_path,
        };

        let first = backup.copy_ledger().await.unwrap();
        let second = backup.copy_ledger().await.unwrap();
        let third = backup.copy_ledger().await.unwrap();

        let name = |p: &PathBuf| p.file_name().unwrap().to_string_lossy().to_string();
        assert!(name(&first).ends_with("-001.json"));
        assert!(name(&second).ends_with("-002.json"));
        assert!(name(&third).ends_with("-003.json"));

        // Rotation keeps only the two newest copies.
        assert!(!first.exists());
        assert!(second.exists());
        assert!(third.exists());
    }
}
