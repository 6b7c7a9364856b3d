use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// One recorded item: a name and its price.
///
/// Construct with [`Entry::new`], which normalizes the name. Deserialized entries are taken as
/// stored; their names were normalized when they were first created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    price: Amount,
}

impl Entry {
    /// Creates an entry, upper-casing the first character of `name`.
    pub fn new(name: impl AsRef<str>, price: Amount) -> Self {
        Self {
            name: capitalize(name.as_ref()),
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Amount {
        self.price
    }
}

/// Upper-cases the first character of `s` and leaves the rest unchanged.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
