//! # SKU Module
//!
//! A SKU (Stock Keeping Unit) identifies a product. In this till every SKU
//! is a single letter, stored upper case.
//!
//! ## Usage
//! ```rust
//! use till_core::sku::Sku;
//!
//! let sku = Sku::new('b').unwrap();
//! assert_eq!(sku.value(), 'B');
//!
//! assert!(Sku::new('7').is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;

use crate::error::SkuError;

/// A validated, upper case, single letter product code.
///
/// ## Invariants
/// - Always a letter
/// - Always normalized (`'a'` and `'A'` are the same SKU)
/// - Immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(char);

impl Sku {
    /// Creates and validates a SKU from a character.
    ///
    /// The character is upper cased first. Characters whose upper case form
    /// is more than one character (e.g. `'ß'`) are kept as they are.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::sku::Sku;
    /// use till_core::SkuError;
    ///
    /// assert_eq!(Sku::new('z').unwrap().value(), 'Z');
    /// assert_eq!(Sku::new(' '), Err(SkuError::InvalidCharacter(' ')));
    /// ```
    pub fn new(value: char) -> Result<Self, SkuError> {
        let upper = to_single_upper(value);
        if !is_letter(upper) {
            return Err(SkuError::InvalidCharacter(value));
        }
        Ok(Sku(upper))
    }

    /// Returns the underlying character.
    #[inline]
    pub const fn value(&self) -> char {
        self.0
    }
}

/// Letters only. `char::is_alphabetic` also admits letter numbers
/// (`'Ⅻ'`), combining marks and enclosed letters (`'ⓐ'`), none of which
/// are letters.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric() && !is_combining_mark(c) && !is_enclosed_letter(c)
}

fn is_enclosed_letter(c: char) -> bool {
    matches!(
        c,
        '\u{24B6}'..='\u{24E9}'     // circled Latin
            | '\u{1F130}'..='\u{1F149}' // squared Latin
            | '\u{1F150}'..='\u{1F169}' // negative circled Latin
            | '\u{1F170}'..='\u{1F189}' // negative squared Latin
    )
}

fn to_single_upper(value: char) -> char {
    let mut upper = value.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => value,
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<char> for Sku {
    type Error = SkuError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Sku::new(value)
    }
}

/// Parses a SKU from a string holding exactly one character.
impl FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Sku::new(c),
            // Empty and multi-character codes report the first offending char
            (Some(_), Some(second)) => Err(SkuError::InvalidCharacter(second)),
            (None, _) => Err(SkuError::InvalidCharacter('\0')),
        }
    }
}

impl TryFrom<String> for Sku {
    type Error = SkuError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self {
        sku.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_upper_cased() {
        for (input, expected) in [('a', 'A'), ('A', 'A'), ('z', 'Z'), ('é', 'É')] {
            assert_eq!(Sku::new(input).unwrap().value(), expected);
        }
    }

    #[test]
    fn test_non_letters_are_rejected() {
        let symbols = ['0', '9', '$', '*', '(', ' ', '\n', '\0', '-'];
        // Alphabetic, but not letters: enclosed letters, letter numbers
        // and a spacing mark
        let lookalikes = ['ⓐ', 'Ⓐ', '🄰', 'ⅻ', 'Ⅻ', '\u{0903}'];

        for input in symbols.into_iter().chain(lookalikes) {
            assert_eq!(Sku::new(input), Err(SkuError::InvalidCharacter(input)));
        }
    }

    #[test]
    fn test_non_latin_letters_are_accepted() {
        for (input, expected) in [('ж', 'Ж'), ('ω', 'Ω'), ('中', '中'), ('ǅ', 'Ǆ')] {
            assert_eq!(Sku::new(input).unwrap().value(), expected);
        }
    }

    #[test]
    fn test_multi_char_upper_case_is_kept() {
        // 'ß' upper cases to "SS"
        assert_eq!(Sku::new('ß').unwrap().value(), 'ß');
    }

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(Sku::new('b').unwrap(), Sku::new('B').unwrap());
        assert_ne!(Sku::new('b').unwrap(), Sku::new('C').unwrap());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("c".parse::<Sku>().unwrap().value(), 'C');
        assert!("".parse::<Sku>().is_err());
        assert!("AB".parse::<Sku>().is_err());
        assert!("1".parse::<Sku>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Sku::new('q').unwrap().to_string(), "Q");
    }
}
