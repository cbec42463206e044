//! Fixed `en-US` number formatting for display.
//!
//! Both the HTML view and the PDF print these strings verbatim, so any
//! formatting change shows up identically in both.

use invoicer_types::{DEFAULT_CURRENCY, finite_or_zero};

const SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "CN¥"),
    ("INR", "₹"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    ("HKD", "HK$"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("KRW", "₩"),
    ("ILS", "₪"),
    ("VND", "₫"),
    ("TWD", "NT$"),
];

/// Currencies without a minor unit.
const ZERO_DECIMAL: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK", "UGX", "PYG", "XAF", "XOF"];

/// Number of fraction digits printed for `code`.
pub fn minor_units(code: &str) -> u32 {
    if ZERO_DECIMAL.contains(&code) { 0 } else { 2 }
}

fn prefix(code: &str) -> String {
    SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| (*symbol).to_string())
        .unwrap_or_else(|| format!("{code}\u{a0}"))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats `amount` as a currency string: `$4,330.00`, `-€12.50`, `¥1,235`.
///
/// Rounds half away from zero. NaN and infinities print as zero, and a value
/// that rounds to zero never carries a minus sign.
pub fn format_currency(amount: f64, code: &str) -> String {
    let code = code.trim().to_ascii_uppercase();
    let code = if code.is_empty() { DEFAULT_CURRENCY.to_string() } else { code };

    let value = finite_or_zero(amount);
    let digits = minor_units(&code);
    let scale = 10u128.pow(digits);
    let scaled = (value.abs() * scale as f64).round() as u128;
    let whole = group_thousands(&(scaled / scale).to_string());

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&prefix(&code));
    out.push_str(&whole);
    if digits > 0 {
        out.push('.');
        out.push_str(&format!("{:0width$}", scaled % scale, width = digits as usize));
    }
    out
}

/// Shortest decimal that reads back as `qty`: `10`, `2.5`, `0.125`.
pub fn format_quantity(qty: f64) -> String {
    let qty = finite_or_zero(qty);
    if qty == 0.0 { "0".to_string() } else { qty.to_string() }
}

/// Percentage for labels such as `Tax (8.25%)`.
pub fn format_percent(percent: f64) -> String {
    format_quantity(percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_with_grouping() {
        assert_eq!(format_currency(4330.0, "USD"), "$4,330.00");
        assert_eq!(format_currency(1234567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
        assert_eq!(format_currency(999.999, "USD"), "$1,000.00");
    }

    #[test]
    fn negatives_lead_with_minus() {
        assert_eq!(format_currency(-5.0, "USD"), "-$5.00");
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn non_finite_prints_zero() {
        assert_eq!(format_currency(f64::NAN, "EUR"), "€0.00");
        assert_eq!(format_currency(f64::INFINITY, "GBP"), "£0.00");
    }

    #[test]
    fn zero_decimal_currencies() {
        assert_eq!(format_currency(1234.5, "JPY"), "¥1,235");
        assert_eq!(format_currency(1000.0, "KRW"), "₩1,000");
    }

    #[test]
    fn unknown_codes_use_the_code() {
        assert_eq!(format_currency(12.0, "CHF"), "CHF\u{a0}12.00");
        assert_eq!(format_currency(-12.0, "chf"), "-CHF\u{a0}12.00");
    }

    #[test]
    fn blank_or_lowercase_codes() {
        assert_eq!(format_currency(1.0, ""), "$1.00");
        assert_eq!(format_currency(1.0, "eur"), "€1.00");
    }

    #[test]
    fn quantities_and_percentages() {
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(-0.0), "0");
        assert_eq!(format_quantity(f64::NAN), "0");
        assert_eq!(format_percent(8.25), "8.25");
    }
}
