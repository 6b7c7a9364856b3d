//! The in-memory list of entries and its derived total.

use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Entry};
use crate::Result;
use anyhow::anyhow;
use rust_decimal::Decimal;
use tracing::trace;

/// The single writable copy of the item list.
///
/// A `Ledger` starts uninitialized and must be given its restored entries exactly once with
/// [`Ledger::initialize`] before anything is appended. Entries are only ever appended; the total
/// is recomputed from the full list after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    state: State,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    #[default]
    Uninitialized,
    Initialized {
        entries: Vec<Entry>,
        total: Amount,
    },
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the entries restored from storage, or starts empty when there were none.
    ///
    /// # Errors
    /// - Returns an error if the ledger has already been initialized.
    /// - Returns an error if the restored prices add up past the largest supported amount.
    pub fn initialize(&mut self, restored: Option<Vec<Entry>>) -> Result<()> {
        if self.is_initialized() {
            return Err(anyhow!("The ledger has already been initialized"))
                .pub_result(ErrorType::State);
        }
        let entries = restored.unwrap_or_default();
        let total = calc_total(&entries)?;
        trace!("Initialized ledger with {} entries", entries.len());
        self.state = State::Initialized { entries, total };
        Ok(())
    }

    /// Creates an entry from `name` and `price`, appends it and recomputes the total.
    ///
    /// The caller is responsible for validating `name` and `price`.
    ///
    /// # Errors
    /// - Returns an error if the ledger has not been initialized.
    /// - `ErrorType::Input` if the new total would overflow. The ledger is left unchanged.
    pub fn append(&mut self, name: impl AsRef<str>, price: Amount) -> Result<Entry> {
        match &mut self.state {
            State::Uninitialized => Err(anyhow!("Cannot append to an uninitialized ledger"))
                .pub_result(ErrorType::State),
            State::Initialized { entries, total } => {
                let entry = Entry::new(name, price);
                entries.push(entry.clone());
                match calc_total(entries) {
                    Ok(new_total) => {
                        *total = new_total;
                        Ok(entry)
                    }
                    Err(e) => {
                        entries.pop();
                        Err(e)
                    }
                }
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Initialized { .. })
    }

    /// The entries in insertion order. Empty while uninitialized.
    pub fn entries(&self) -> &[Entry] {
        match &self.state {
            State::Uninitialized => &[],
            State::Initialized { entries, .. } => entries,
        }
    }

    pub fn total(&self) -> Amount {
        match &self.state {
            State::Uninitialized => Amount::ZERO,
            State::Initialized { total, .. } => *total,
        }
    }

    /// What percentage of the total `amount` represents. Returns zero when the total is zero.
    pub fn percentage(&self, amount: Amount) -> Decimal {
        let total = self.total().value();
        if total.is_zero() {
            return Decimal::ZERO;
        }
        amount
            .value()
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or_default()
    }
}

/// Sums the prices of `entries`.
///
/// # Errors
/// - `ErrorType::Input` if the sum does not fit in an `Amount`.
pub fn calc_total(entries: &[Entry]) -> Result<Amount> {
    let total = entries
        .iter()
        .try_fold(Amount::ZERO, |sum, entry| sum.checked_add(entry.price()));
    match total {
        Some(total) => Ok(total),
        None => Err(anyhow!("The total is larger than the largest supported amount"))
            .pub_result(ErrorType::Input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn initialized() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.initialize(None).unwrap();
        ledger
    }

    #[test]
    fn test_empty_total_is_zero() {
        let ledger = initialized();
        assert!(ledger.entries().is_empty());
        assert_eq!(ledger.total(), Amount::ZERO);
        assert_eq!(calc_total(&[]).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_total_tracks_every_append() {
        let mut ledger = initialized();
        let prices = ["3", "2", "0.25", "10", "0", "1.75"];
        let mut expected = Decimal::ZERO;
        for (i, p) in prices.iter().enumerate() {
            ledger.append(format!("item {i}"), amount(p)).unwrap();
            expected += amount(p).value();
            assert_eq!(ledger.total().value(), expected);
            assert_eq!(ledger.total(), calc_total(ledger.entries()).unwrap());
        }
        assert_eq!(ledger.total(), amount("17"));
    }

    #[test]
    fn test_apple_then_bread() {
        let mut ledger = initialized();
        let apple = ledger.append("apple", amount("3")).unwrap();
        ledger.append("bread", amount("2")).unwrap();
        assert_eq!(apple.name(), "Apple");
        assert_eq!(
            ledger.entries(),
            &[
                Entry::new("Apple", amount("3")),
                Entry::new("Bread", amount("2"))
            ]
        );
        assert_eq!(ledger.total(), amount("5"));
    }

    #[test]
    fn test_zero_price_leaves_total_unchanged() {
        let mut ledger = initialized();
        ledger.append("apple", amount("3")).unwrap();
        ledger.append("milk", amount("0")).unwrap();
        assert_eq!(ledger.entries().len(), 2);
        assert_eq!(ledger.total(), amount("3"));
    }

    #[test]
    fn test_initialize_with_restored_entries() {
        let mut ledger = Ledger::new();
        ledger
            .initialize(Some(vec![
                Entry::new("Apple", amount("3")),
                Entry::new("Bread", amount("2")),
            ]))
            .unwrap();
        assert_eq!(ledger.total(), amount("5"));
        assert_eq!(ledger.entries()[0].name(), "Apple");
    }

    #[test]
    fn test_append_before_initialize_fails() {
        let mut ledger = Ledger::new();
        let err = ledger.append("apple", amount("3")).unwrap_err();
        assert_eq!(crate::error::error_type(&err), Some(ErrorType::State));
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let mut ledger = initialized();
        ledger.append("apple", amount("3")).unwrap();
        assert!(ledger.initialize(None).is_err());
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn test_append_past_the_largest_total_fails() {
        let mut ledger = initialized();
        let max = Amount::new(Decimal::MAX);
        ledger.append("a", max).unwrap();
        let err = ledger.append("b", max).unwrap_err();
        assert_eq!(crate::error::error_type(&err), Some(ErrorType::Input));
        assert_eq!(ledger.entries(), &[Entry::new("A", max)]);
        assert_eq!(ledger.total(), max);
    }

    #[test]
    fn test_initialize_with_overflowing_entries_fails() {
        let max = Amount::new(Decimal::MAX);
        let mut ledger = Ledger::new();
        let restored = vec![Entry::new("A", max), Entry::new("B", max)];
        assert!(ledger.initialize(Some(restored)).is_err());
        assert!(!ledger.is_initialized());
    }

    #[test]
    fn test_percentage() {
        let mut ledger = initialized();
        ledger.append("apple", amount("3")).unwrap();
        ledger.append("bread", amount("1")).unwrap();
        assert_eq!(ledger.percentage(amount("1")), Decimal::from(25));
        assert_eq!(ledger.percentage(amount("4")), Decimal::from(100));
    }

    #[test]
    fn test_percentage_of_zero_total() {
        let mut ledger = initialized();
        assert_eq!(ledger.percentage(amount("5")), Decimal::ZERO);
        ledger.append("milk", amount("0")).unwrap();
        assert_eq!(ledger.percentage(amount("5")), Decimal::ZERO);
    }
}
