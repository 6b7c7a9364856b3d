//! These structs provide the CLI interface for the shoplist CLI.

use crate::bridge::ClearScope;
use crate::model::Amount;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// shoplist: A command-line shopping list with a running total.
///
/// Each item has a name and a price. Items are kept in a storage file in the shoplist home
/// directory, shown newest first, and totalled. Run `shoplist init` once before anything else.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// By default the data directory is $HOME/shoplist. Pass --home or set SHOPLIST_HOME to put
    /// it somewhere else.
    Init(InitArgs),
    /// Show the list and its total.
    Show,
    /// Add an item to the list, then show the list.
    Add(AddArgs),
    /// Erase the stored list. A backup is written first.
    Clear(ClearArgs),
    /// Show what percentage of the current total an amount is.
    Share(ShareArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where shoplist data and configuration is held. Defaults to ~/shoplist
    #[arg(long, env = "SHOPLIST_HOME", default_value_t = default_shoplist_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `shoplist init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The heading shown above the list.
    #[arg(long)]
    heading: Option<String>,

    /// The storage slot the list is kept under. Defaults to "items".
    #[arg(long)]
    storage_key: Option<String>,
}

impl InitArgs {
    pub fn new(heading: Option<String>, storage_key: Option<String>) -> Self {
        Self {
            heading,
            storage_key,
        }
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }
}

/// Args for the `shoplist add` command.
///
/// Both fields are optional here so that a missing value is reported by the list itself rather
/// than by the argument parser.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The item name. The first letter is capitalized.
    #[arg(long, default_value = "")]
    name: String,

    /// The item price, e.g. 3, 2.50 or $2.50.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    price: String,
}

impl AddArgs {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &str {
        &self.price
    }
}

/// Args for the `shoplist clear` command.
#[derive(Debug, Parser, Clone)]
pub struct ClearArgs {
    /// What to erase: "key" erases only the list, "all" erases everything in the storage file.
    #[arg(long, default_value_t = ClearScope::Key)]
    scope: ClearScope,
}

impl ClearArgs {
    pub fn new(scope: ClearScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> ClearScope {
        self.scope
    }
}

/// Args for the `shoplist share` command.
#[derive(Debug, Parser, Clone)]
pub struct ShareArgs {
    /// The amount to compare against the total.
    #[arg(allow_hyphen_values = true)]
    amount: Amount,
}

impl ShareArgs {
    pub fn new(amount: Amount) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

fn default_shoplist_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("shoplist"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SHOPLIST_HOME instead of relying on the default \
                shoplist home directory.",
            );
            PathBuf::from("shoplist")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
