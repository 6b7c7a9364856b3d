use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its backups subdirectory and an initial `config.json`.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/shoplist`
/// - `heading` - The heading shown above the list.
/// - `storage_key` - The storage slot the list is kept under.
///
/// # Errors
/// - Returns an error if any file operations fail or the directory is already initialized.
pub async fn init(
    home: &Path,
    heading: Option<&str>,
    storage_key: Option<&str>,
) -> Result<Out<()>> {
    let config = Config::create(home, heading, storage_key)
        .await
        .context("Unable to create the data directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the shoplist directory at {}",
        config.root().display()
    )
    .into())
}
