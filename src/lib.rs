pub mod args;
mod backup;
pub mod bridge;
pub mod commands;
mod config;
pub mod error;
pub mod handlers;
pub mod input;
pub mod ledger;
pub mod model;
pub mod render;
pub mod store;
mod utils;


pub use backup::Backup;
pub use config::Config;
pub use error::Error;
pub use error::Result;
