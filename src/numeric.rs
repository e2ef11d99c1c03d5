//! Integer ordering for [`Tree`][crate::Tree] keys.
//!
//! A tree never compares keys itself. It asks its comparator, any [`Compare<str>`], how a
//! *candidate* key (the one being inserted, searched for, or deleted) orders against a key
//! already stored in a node: `compare(candidate, existing)`. Besides [`Numeric`], the
//! comparators of the [`compare`] crate work as they are: [`natural()`][compare::natural] is the
//! lexical default, `.rev()` reverses any comparator, and any `Fn(&str, &str) -> Ordering`
//! closure is a comparator too.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use keyed_bst::{natural, Compare, Tree};
//!
//! // Order keys by length, then lexically.
//! let by_len = |l: &str, r: &str| l.len().cmp(&r.len()).then_with(|| l.cmp(r));
//!
//! let mut tree = Tree::new(by_len);
//! tree.insert("ccc", 3).unwrap();
//! tree.insert("a", 1).unwrap();
//! tree.insert("bb", 2).unwrap();
//!
//! let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
//! assert_eq!(values, [1, 2, 3]);
//!
//! let mut backwards = Tree::new(natural().rev());
//! backwards.insert("a", 1).unwrap();
//! backwards.insert("b", 2).unwrap();
//! assert_eq!(backwards.iter().next(), Some(("b", &2)));
//! assert_eq!(by_len.compare("bb", "a"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

use compare::Compare;

/// Orders keys by the integer they start with, so `"9" < "10" < "100"`.
///
/// Keys are parsed leniently: leading ASCII whitespace is skipped, an optional sign is accepted,
/// and parsing stops at the first non-digit. A key with no leading digits reads as `0`, so
/// `"abc"` and `"0"` are the *same* key under this ordering. Values outside the range of an
/// `i64` saturate to `i64::MIN` or `i64::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Numeric;

impl Numeric {
    /// Parses the leading integer of `key`.
    ///
    /// ```
    /// use keyed_bst::Numeric;
    ///
    /// assert_eq!(Numeric::parse("52"), 52);
    /// assert_eq!(Numeric::parse("  -6 apples"), -6);
    /// assert_eq!(Numeric::parse("+7"), 7);
    /// assert_eq!(Numeric::parse("Uno"), 0);
    /// ```
    pub fn parse(key: &str) -> i64 {
        // Space, \t, \n, \v, \f and \r only. Unicode spaces are not skipped.
        let trimmed = key.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B');
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits = digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .map(|digit| i64::from(digit - b'0'));

        // Negative values accumulate downwards so that i64::MIN is reachable.
        if negative {
            digits.fold(0, |acc: i64, digit| acc.saturating_mul(10).saturating_sub(digit))
        } else {
            digits.fold(0, |acc: i64, digit| acc.saturating_mul(10).saturating_add(digit))
        }
    }
}

impl Compare<str> for Numeric {
    fn compare(&self, l: &str, r: &str) -> Ordering {
        Self::parse(l).cmp(&Self::parse(r))
    }
}
