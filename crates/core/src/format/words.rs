//! Indian number names
//!
//! 1,23,45,678 -> "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight"

use super::LAKH;

const UNITS: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Convert an amount to its Indian-numbering-system name
///
/// The sign is dropped and the magnitude rounded to the nearest integer, so
/// `to_indian_words(-2.5) == to_indian_words(2.5) == "Three"`.
/// Every finite value is named exactly; crore counts nest ("One Crore Crore").
/// Callers must reject NaN and infinities; they map to "Zero".
pub fn to_indian_words(n: f64) -> String {
    let magnitude = n.abs().round();
    if !magnitude.is_finite() {
        return "Zero".to_string();
    }

    // An integral f64 prints as its exact decimal digits
    let words = integer_words(&format!("{:.0}", magnitude));
    if words.is_empty() {
        "Zero".to_string()
    } else {
        words
    }
}

/// Words for a decimal digit string
fn integer_words(digits: &str) -> String {
    let digits = digits.trim_start_matches('0');
    let (crore_digits, below_crore_digits) = digits.split_at(digits.len().saturating_sub(7));
    let mut n: u64 = below_crore_digits.parse().unwrap_or(0);
    let mut groups: Vec<String> = Vec::with_capacity(4);

    if !crore_digits.is_empty() {
        // Crore counts past 999 reuse the full converter ("One Thousand Crore")
        groups.push(format!("{} Crore", integer_words(crore_digits)));
    }

    let lakh = n / LAKH;
    if lakh > 0 {
        groups.push(format!("{} Lakh", below_thousand(lakh)));
        n %= LAKH;
    }

    let thousand = n / 1000;
    if thousand > 0 {
        groups.push(format!("{} Thousand", below_thousand(thousand)));
        n %= 1000;
    }

    if n > 0 {
        groups.push(below_thousand(n));
    }

    groups.join(" ")
}

/// Words for 1..=999
fn below_thousand(mut n: u64) -> String {
    debug_assert!(n < 1000);
    let mut parts: Vec<&str> = Vec::with_capacity(4);

    if n >= 100 {
        parts.push(UNITS[(n / 100) as usize]);
        parts.push("Hundred");
        n %= 100;
    }

    if n >= 20 {
        parts.push(TENS[(n / 10) as usize]);
        n %= 10;
        if n > 0 {
            parts.push(UNITS[n as usize]);
        }
    } else if n >= 10 {
        parts.push(TEENS[(n - 10) as usize]);
    } else if n > 0 {
        parts.push(UNITS[n as usize]);
    }

    parts.join(" ")
}
