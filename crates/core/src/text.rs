//! String helpers.

/// A string is blank when it is empty or consists only of whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
