//! The anagram rule and the counter it feeds.
//!
//! Two strings are considered anagrams when their sets of *distinct*
//! characters are equal. Character frequency and order are ignored, so
//! `"aab"` and `"ab"` match while `"abc"` and `"abd"` do not.

use std::collections::HashSet;

/// Name of the shared counter incremented on every positive match.
pub const IS_ANAGRAM_COUNTER: &str = "is_anagram_counter";

/// Compare the distinct character sets of `first` and `second`.
///
/// Comparison is case-sensitive and works on Unicode scalar values.
/// Two empty strings match.
#[must_use]
pub fn is_anagram(first: &str, second: &str) -> bool {
    let first: HashSet<char> = first.chars().collect();
    let second: HashSet<char> = second.chars().collect();
    first == second
}
