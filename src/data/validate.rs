//! Sanitization for free-typed numeric and serial input.

use regex::Regex;

fn digits(raw: &str) -> String {
    // not \D: the regex crate's \d matches digits from any script
    let re = Regex::new(r"[^0-9]").unwrap();
    re.replace_all(raw, "").into_owned()
}

/// Parses a numeric field that may be left unset. Non-digit characters are
/// stripped before parsing, an all-stripped value counts as unset, and the
/// result is clamped to the given range. Inputs too large for `u32` clamp
/// to `max`.
pub fn numeric(raw: &str, min: u32, max: u32) -> Option<u32> {
    let digits = digits(raw);
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    Some(value.clamp(min, max))
}

/// Same as [`numeric`], but the field always holds a value: an unset input
/// falls back to `min`.
pub fn numeric_or_min(raw: &str, min: u32, max: u32) -> u32 {
    numeric(raw, min, max).unwrap_or(min)
}

/// Keeps at most the first eight digits of the input, in order.
pub fn serial(raw: &str) -> String {
    digits(raw).chars().take(8).collect()
}
