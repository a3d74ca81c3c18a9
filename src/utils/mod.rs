use chrono::{DateTime, Utc};

pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}

/// Lenient number parsing for form input. Surrounding whitespace is ignored.
/// Commas are digit grouping (`5,000`, `1,23,456.5`) unless a lone comma is
/// followed by other than three digits, in which case it is a decimal comma
/// (`2,5`). Returns `None` for anything else.
pub fn parse_amount(value: &str) -> Option<f64> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }
    let normalized = match raw.split_once(',') {
        None => raw.to_string(),
        Some((whole, fraction))
            if !raw.contains('.')
                && !fraction.contains(',')
                && fraction.len() != 3
                && is_digits(fraction) =>
        {
            format!("{}.{}", whole, fraction)
        }
        Some(_) => strip_grouping(raw)?,
    };
    normalized.parse::<f64>().ok()
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

// Every group after a comma must be digits, and the last group before any
// decimal point must have exactly three.
fn strip_grouping(raw: &str) -> Option<String> {
    let (integer, fraction) = match raw.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw, None),
    };
    let mut groups = integer.split(',');
    let mut digits = groups.next()?.to_string();
    let mut last_len = None;
    for group in groups {
        if !is_digits(group) {
            return None;
        }
        last_len = Some(group.len());
        digits.push_str(group);
    }
    if last_len != Some(3) {
        return None;
    }
    match fraction {
        Some(fraction) => Some(format!("{}.{}", digits, fraction)),
        None => Some(digits),
    }
}

/// Formats money the en-IN way: `₹1,23,456.78`, `-₹50.00`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format_decimal(amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, group_indian(whole), fraction)
}

// Last three digits, then groups of two: 12345678 -> 1,23,45,678.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Turns a bill name into something safe to use as a file name.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "Invoice".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_form_numbers() {
        assert_eq!(parse_amount("12"), Some(12.0));
        assert_eq!(parse_amount(" 2,5 "), Some(2.5));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn commas_in_form_numbers() {
        assert_eq!(parse_amount("5,000"), Some(5000.0));
        assert_eq!(parse_amount("1,500"), Some(1500.0));
        assert_eq!(parse_amount("1,23,456.5"), Some(123456.5));
        assert_eq!(parse_amount("12,345,678"), Some(12345678.0));
        assert_eq!(parse_amount("2,5"), Some(2.5));
        assert_eq!(parse_amount("0,75"), Some(0.75));
        assert_eq!(parse_amount("1,2,3"), None);
        assert_eq!(parse_amount("1,50.5"), None);
        assert_eq!(parse_amount("1,,000"), None);
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(format_currency(0.0, "₹"), "₹0.00");
        assert_eq!(format_currency(150.0, "₹"), "₹150.00");
        assert_eq!(format_currency(1200.0, "₹"), "₹1,200.00");
        assert_eq!(format_currency(123456.789, "₹"), "₹1,23,456.79");
        assert_eq!(format_currency(12345678.0, "₹"), "₹1,23,45,678.00");
        assert_eq!(format_currency(-1000.0, "₹"), "-₹1,000.00");
        assert_eq!(format_currency(-0.001, "₹"), "₹0.00");
    }

    #[test]
    fn dates_are_day_first() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(format_date(date), "07/03/2024");
    }

    #[test]
    fn file_stems_are_sanitized() {
        assert_eq!(file_stem("Mr. Sharma Kitchen"), "Mr__Sharma_Kitchen");
        assert_eq!(file_stem("  "), "Invoice");
    }
}
