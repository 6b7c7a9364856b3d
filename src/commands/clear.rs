use crate::backup::CLEAR;
use crate::bridge::ClearScope;
use crate::commands::{plural, Out};
use crate::error::{error_type, ErrorType};
use crate::{Config, Result};
use tracing::{debug, warn};

/// Erases the stored list, or with `ClearScope::All` the whole storage file.
///
/// The current list is written to the backups directory first, unless it is empty or cannot be
/// parsed.
pub async fn clear(config: Config, scope: ClearScope) -> Result<Out<ClearScope>> {
    let bridge = config.bridge();
    let entries = match bridge.load().await {
        Ok(entries) => entries.unwrap_or_default(),
        Err(e) if error_type(&e) == Some(ErrorType::Deserialization) => {
            warn!("{e}. It will be cleared without a backup.");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    if !entries.is_empty() {
        let path = config.backup().save_json(CLEAR, &entries).await?;
        debug!("Saved backup to {}", path.display());
    }

    bridge.clear(scope).await?;
    let count = entries.len();
    let message = match scope {
        ClearScope::Key => format!("Cleared {count} item{}", plural(count)),
        ClearScope::All => format!(
            "Cleared {count} item{} and all other stored values",
            plural(count)
        ),
    };
    Ok(Out::new(message, scope))
}
