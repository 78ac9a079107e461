//! Wildcard pattern matching for `IS` filters.
//!
//! An `IS` value is a literal string that may carry one `*` at its start
//! and/or one `*` at its end:
//!
//! - `*s*`: the field contains `s`
//! - `*s`: the field ends with `s`
//! - `s*`: the field starts with `s`
//! - `s`: the field equals `s`
//!
//! A `*` anywhere else is rejected. Matching is **case-sensitive** and
//! operates on Unicode scalar values.

use crate::error::{Error, Result};
use alloc::string::{String, ToString};

/// A parsed `IS` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildcardPattern {
    literal: String,
    prefix_wildcard: bool,
    suffix_wildcard: bool,
}

impl WildcardPattern {
    /// Parses an `IS` value.
    ///
    /// ```
    /// use insight_core::pattern_match::WildcardPattern;
    /// let p = WildcardPattern::parse("*sci*").unwrap();
    /// assert!(p.matches("comp science"));
    /// assert!(WildcardPattern::parse("c*sc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let prefix_wildcard = input.starts_with('*');
        let suffix_wildcard = input.ends_with('*');

        let mut literal = input;
        if prefix_wildcard {
            literal = &literal[1..];
        }
        // A lone "*" is both the leading and the trailing wildcard.
        if suffix_wildcard && !literal.is_empty() {
            literal = &literal[..literal.len() - 1];
        }

        if literal.contains('*') {
            return Err(Error::validation(
                "Wildcards (*) can only be placed at the beginning or end of an IS string",
            ));
        }

        Ok(Self {
            literal: literal.to_string(),
            prefix_wildcard,
            suffix_wildcard,
        })
    }

    /// Returns the value with its wildcards trimmed.
    #[inline]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns true if the value started with `*`.
    #[inline]
    pub fn prefix_wildcard(&self) -> bool {
        self.prefix_wildcard
    }

    /// Returns true if the value ended with `*`.
    #[inline]
    pub fn suffix_wildcard(&self) -> bool {
        self.suffix_wildcard
    }

    /// Tests a field value against this pattern.
    pub fn matches(&self, value: &str) -> bool {
        match (self.prefix_wildcard, self.suffix_wildcard) {
            (true, true) => value.contains(self.literal.as_str()),
            (true, false) => value.ends_with(self.literal.as_str()),
            (false, true) => value.starts_with(self.literal.as_str()),
            (false, false) => value == self.literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> WildcardPattern {
        WildcardPattern::parse(s).unwrap()
    }

    #[test]
    fn wildcard_exact() {
        assert!(pattern("cpsc").matches("cpsc"));
        assert!(!pattern("cpsc").matches("cpsc "));
        assert!(!pattern("cpsc").matches("CPSC"));
    }

    #[test]
    fn wildcard_prefix() {
        let p = pattern("*sc");
        assert!(p.prefix_wildcard());
        assert!(!p.suffix_wildcard());
        assert_eq!(p.literal(), "sc");
        assert!(p.matches("cpsc"));
        assert!(p.matches("sc"));
        assert!(!p.matches("scx"));
    }

    #[test]
    fn wildcard_suffix() {
        let p = pattern("cp*");
        assert!(p.matches("cpsc"));
        assert!(p.matches("cp"));
        assert!(!p.matches("xcp"));
    }

    #[test]
    fn wildcard_both() {
        let p = pattern("*ps*");
        assert!(p.matches("cpsc"));
        assert!(p.matches("ps"));
        assert!(!p.matches("p s"));
    }

    #[test]
    fn wildcard_lone_star_matches_everything() {
        let p = pattern("*");
        assert!(p.prefix_wildcard());
        assert!(p.suffix_wildcard());
        assert_eq!(p.literal(), "");
        assert!(p.matches(""));
        assert!(p.matches("anything"));
    }

    #[test]
    fn wildcard_double_star_matches_everything() {
        let p = pattern("**");
        assert_eq!(p.literal(), "");
        assert!(p.matches("math"));
    }

    #[test]
    fn wildcard_empty_matches_only_empty() {
        let p = pattern("");
        assert!(p.matches(""));
        assert!(!p.matches("a"));
    }

    #[test]
    fn wildcard_inner_star_rejected() {
        assert!(WildcardPattern::parse("c*sc").is_err());
        assert!(WildcardPattern::parse("***").is_err());
        assert!(WildcardPattern::parse("*c*s*").is_err());
    }

    #[test]
    fn wildcard_unicode() {
        assert!(pattern("*é").matches("café"));
        assert!(pattern("ca*").matches("café"));
    }
}
