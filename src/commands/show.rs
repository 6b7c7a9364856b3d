use crate::commands::{plural, Out, Session};
use crate::render::Page;
use crate::{Config, Result};

/// Loads the stored list and renders it.
///
/// Returns the rendered page as both the view and the structured output.
pub async fn show(config: Config) -> Result<Out<Page>> {
    let session = Session::load(&config).await?;
    let count = session.ledger.entries().len();
    let message = format!(
        "{count} item{} totalling {} {}",
        plural(count),
        config.currency(),
        session.ledger.total()
    );
    let page = session.page().clone();
    Ok(Out::new(message, page.clone()).with_view(page.to_string()))
}
