//! Indian currency formatting

/// Format an amount as Indian rupees, e.g. `₹1,23,45,678.9`
///
/// Digits are grouped 3 then 2 from the right. At most two fraction digits
/// are kept and trailing zeros are dropped, so `1000.0` renders as `₹1,000`.
/// Rounding works on the exact decimal value of the double, half away from
/// zero, so `0.015` (stored as 0.01499...) renders as `₹0.01`.
/// NaN renders as an empty string.
pub fn to_indian_currency(n: f64) -> String {
    if n.is_nan() {
        return String::new();
    }
    if n.is_infinite() {
        return if n > 0.0 { "₹∞".to_string() } else { "₹-∞".to_string() };
    }

    let fixed = fixed_two_places(n.abs());
    let (rupees, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::from("₹");
    let is_zero = rupees.bytes().all(|b| b == b'0') && fraction.is_empty();
    if n < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_indian(rupees));

    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }

    out
}

/// Exact two-decimal rendering of a non-negative finite value
///
/// `{:.2}` rounds exact ties to even; ties only occur for odd multiples of
/// 1/8 (x.125, x.375, ...) and are pushed away from zero here.
fn fixed_two_places(value: f64) -> String {
    let eighths = value * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;
    if !is_tie {
        return format!("{:.2}", value);
    }

    let exact = format!("{:.3}", value);
    increment_last_digit(&exact[..exact.len() - 1])
}

/// "12.99" -> "13.00"
fn increment_last_digit(decimal: &str) -> String {
    let mut bytes: Vec<u8> = decimal.bytes().collect();
    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, b'1');
            break;
        }
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            digit => {
                bytes[i] = digit + 1;
                break;
            }
        }
    }
    bytes.into_iter().map(char::from).collect()
}

/// Group integer digits the Indian way: "12345678" -> "1,23,45,678"
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}
