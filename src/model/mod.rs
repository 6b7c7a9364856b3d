//! Types that represent the core data model: `Entry` and the `Amount` it is priced in.
mod amount;
mod entry;

pub use amount::{Amount, AmountError};
pub use entry::{capitalize, Entry};
