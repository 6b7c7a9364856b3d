//! The two events the list reacts to: the page being loaded and an item being submitted.
//!
//! Both take the ledger, renderer and bridge explicitly so they can be driven against any
//! `Store` and any `Surface`.

use crate::bridge::Bridge;
use crate::error::{error_type, ErrorType, IntoResult};
use crate::input::Submission;
use crate::ledger::Ledger;
use crate::model::Entry;
use crate::render::{Renderer, Surface};
use crate::store::Store;
use crate::Result;
use tracing::{debug, warn};

/// Shows `heading`, restores the stored entries into `ledger` and replays them onto the display.
///
/// A stored value that cannot be parsed is logged and treated as an empty list. It is left in
/// place until the next successful submission overwrites it.
///
/// # Errors
/// - Returns an error if the store cannot be read.
/// - Returns an error if `ledger` was already initialized.
pub async fn on_load<S, D>(
    heading: &str,
    ledger: &mut Ledger,
    renderer: &mut Renderer<D>,
    bridge: &Bridge<S>,
) -> Result<()>
where
    S: Store,
    D: Surface,
{
    renderer.show_heading(heading);
    let restored = match bridge.load().await {
        Ok(restored) => restored,
        Err(e) if error_type(&e) == Some(ErrorType::Deserialization) => {
            warn!("{e}. Starting with an empty list.");
            None
        }
        Err(e) => return Err(e),
    };
    ledger.initialize(restored)?;
    renderer.replay(ledger.entries(), ledger.total());
    debug!(
        "Replayed {} entries, total {}",
        ledger.entries().len(),
        ledger.total()
    );
    Ok(())
}

/// Validates `submission`, appends it, shows it with the new total, and saves the list.
///
/// Nothing is changed or written when validation fails.
///
/// # Errors
/// - `ErrorType::Input` if `submission` is rejected.
/// - Returns an error if `ledger` is not initialized or the list cannot be saved.
pub async fn on_submit<S, D>(
    submission: &Submission,
    ledger: &mut Ledger,
    renderer: &mut Renderer<D>,
    bridge: &Bridge<S>,
) -> Result<Entry>
where
    S: Store,
    D: Surface,
{
    let (name, price) = submission.validate().pub_result(ErrorType::Input)?;
    let entry = ledger.append(name, price)?;
    let fragment = renderer.render_entry(&entry);
    renderer.append_to_display(fragment);
    renderer.show_total(ledger.total());
    bridge.save(ledger.entries()).await?;
    debug!("Added {} at {}", entry.name(), entry.price());
    Ok(entry)
}
