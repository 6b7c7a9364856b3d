use crate::args::AddArgs;
use crate::commands::{Out, Session};
use crate::handlers;
use crate::input::Submission;
use crate::model::Entry;
use crate::{Config, Result};

/// Loads the stored list, adds one item to it and renders the result.
///
/// # Errors
/// - `ErrorType::Input` if the name or price is missing or the price is not a non-negative
///   number. Nothing is written in that case.
/// - Returns an error if the list cannot be loaded or saved.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Entry>> {
    let mut session = Session::load(&config).await?;
    let submission = Submission::new(args.name(), args.price());
    let entry = handlers::on_submit(
        &submission,
        &mut session.ledger,
        &mut session.renderer,
        &session.bridge,
    )
    .await?;
    let message = format!(
        "Added {}, total is now {} {}",
        entry.name(),
        config.currency(),
        session.ledger.total()
    );
    Ok(Out::new(message, entry).with_view(session.page().to_string()))
}
