//! Command handlers for the shoplist CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod clear;
mod init;
mod share;
mod show;

use crate::bridge::Bridge;
use crate::handlers;
use crate::ledger::Ledger;
use crate::render::{Page, Renderer};
use crate::store::FileStore;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::add;
pub use clear::clear;
pub use init::init;
pub use share::share;
pub use show::show;

/// The output type for a command. This allows the command to return a consistent message,
/// optionally some structured data, and optionally a view meant for the terminal.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,

    /// Text written to stdout, such as the rendered list.
    #[serde(skip)]
    view: Option<String>,
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
            view: None,
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
            view: None,
        }
    }

    /// Attach a view to be written to stdout.
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Print the view (if it exists) to stdout, the message to `info!` and the structured data
    /// (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        if let Some(view) = self.view() {
            println!("{view}");
        }
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// The ledger, renderer and bridge for one invocation, after the list has been loaded.
struct Session {
    ledger: Ledger,
    renderer: Renderer<Page>,
    bridge: Bridge<FileStore>,
}

impl Session {
    /// Builds the three components from `config` and runs the load handler.
    async fn load(config: &Config) -> Result<Self> {
        let mut ledger = Ledger::new();
        let mut renderer = Renderer::new(Page::new(), config.currency());
        let bridge = config.bridge();
        handlers::on_load(config.heading(), &mut ledger, &mut renderer, &bridge).await?;
        Ok(Self {
            ledger,
            renderer,
            bridge,
        })
    }

    fn page(&self) -> &Page {
        self.renderer.surface()
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
