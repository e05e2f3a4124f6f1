use crate::commands::Out;
use crate::currency::Currency;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its subdirectories and:
/// - Creates an initial `config.json` file using `currency` along with default settings
/// - Creates an empty `ledger.json` file
///
/// # Arguments
/// - `divvy_home` - The directory that will be the root of the data directory, e.g. `$HOME/divvy`
/// - `currency` - The currency used to display amounts.
///
/// # Errors
/// - Returns an error if any file operations fail or if a ledger already exists there.
pub async fn init(divvy_home: &Path, currency: Currency) -> Result<Out<()>> {
    let config = Config::create(divvy_home, currency)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Initialized the divvy home at '{}' with currency {}",
        config.root().display(),
        config.currency().code()
    )
    .into())
}
