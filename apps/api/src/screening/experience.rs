use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::record::DetectedExperience;

/// Phrases marking a candidate with no professional experience. Matched case-insensitively.
const FRESHER_PHRASES: [&str; 6] = [
    "fresher",
    "recent graduate",
    "fresh graduate",
    "entry level",
    "entry-level",
    "new grad",
];

static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*\+?\s*(?:year|years|yrs)\b").expect("years pattern is valid")
});

static DECIMAL_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

/// Scans raw resume text for experience signals.
///
/// A fresher phrase anywhere wins over an explicit year count. Otherwise the
/// first "<n> years" style match is used. Any Unicode decimal digits count, and
/// a value too large for `u32` saturates.
pub fn detect_experience(text: &str) -> DetectedExperience {
    let lower = text.to_lowercase();
    if FRESHER_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return DetectedExperience::Fresher;
    }

    YEARS_RE
        .captures(text)
        .and_then(|caps| parse_years(&caps[1]))
        .map(|years| DetectedExperience::Years { years })
        .unwrap_or(DetectedExperience::Unknown)
}

fn parse_years(digits: &str) -> Option<u32> {
    digits.chars().try_fold(0u32, |acc, c| {
        let digit = decimal_value(c)?;
        Some(acc.saturating_mul(10).saturating_add(digit))
    })
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a decimal digit from any script.
///
/// Unicode lays out every decimal digit set as ten consecutive code points
/// starting at zero, so the value is the position inside that run.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut position = 0;
    let mut cp = c as u32;
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        position += 1;
        cp -= 1;
    }
    Some(position % 10)
}
