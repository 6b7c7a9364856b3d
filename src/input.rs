//! Validation of the raw values a user submits.

use crate::model::{Amount, AmountError};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The raw, unvalidated values from the input surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    name: String,
    price: String,
}

impl Submission {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Checks that both fields are present and that the price is a non-negative number.
    ///
    /// Surrounding whitespace is ignored; a field holding only whitespace counts as empty.
    pub fn validate(&self) -> Result<(String, Amount), InputError> {
        let name = self.name.trim();
        let price = self.price.trim();
        match (name.is_empty(), price.is_empty()) {
            (true, true) => return Err(InputError::Empty),
            (true, false) => return Err(InputError::MissingName),
            (false, true) => return Err(InputError::MissingPrice),
            (false, false) => {}
        }
        let amount = Amount::from_str(price).map_err(InputError::InvalidPrice)?;
        if amount.is_negative() {
            return Err(InputError::NegativePrice(amount));
        }
        Ok((name.to_string(), amount))
    }
}

/// Reasons a submission is rejected. The message is what the user is shown.
#[derive(Debug)]
pub enum InputError {
    /// Both fields were empty.
    Empty,
    MissingName,
    MissingPrice,
    InvalidPrice(AmountError),
    NegativePrice(Amount),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Empty => f.write_str("Kindly input something in the text input field."),
            InputError::MissingName => f.write_str("Kindly input a name for the item."),
            InputError::MissingPrice => f.write_str("Kindly input a price for the item."),
            InputError::InvalidPrice(e) => write!(f, "'{}' is not a valid price.", e.input()),
            InputError::NegativePrice(a) => write!(f, "The price cannot be negative: {a}"),
        }
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        let (name, price) = Submission::new("apple", "3").validate().unwrap();
        assert_eq!(name, "apple");
        assert_eq!(price, Amount::from(3));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let (name, price) = Submission::new("  bread ", " $2.50 ").validate().unwrap();
        assert_eq!(name, "bread");
        assert_eq!(price.to_string(), "2.5");
    }

    #[test]
    fn test_zero_price_is_accepted() {
        let (_, price) = Submission::new("milk", "0").validate().unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_both_empty() {
        let err = Submission::new("", "").validate().unwrap_err();
        assert!(matches!(err, InputError::Empty));
        assert_eq!(
            err.to_string(),
            "Kindly input something in the text input field."
        );
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let err = Submission::new("   ", "\t").validate().unwrap_err();
        assert!(matches!(err, InputError::Empty));
    }

    #[test]
    fn test_partial_input_is_rejected() {
        assert!(matches!(
            Submission::new("", "3").validate().unwrap_err(),
            InputError::MissingName
        ));
        assert!(matches!(
            Submission::new("apple", "").validate().unwrap_err(),
            InputError::MissingPrice
        ));
    }

    #[test]
    fn test_non_numeric_price() {
        let err = Submission::new("apple", "cheap").validate().unwrap_err();
        assert!(matches!(err, InputError::InvalidPrice(_)));
        assert_eq!(err.to_string(), "'cheap' is not a valid price.");
    }

    #[test]
    fn test_negative_price() {
        let err = Submission::new("refund", "-4").validate().unwrap_err();
        assert!(matches!(err, InputError::NegativePrice(_)));
        assert_eq!(err.to_string(), "The price cannot be negative: -4");
    }
}
