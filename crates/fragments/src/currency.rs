use serde_json::Value;

/// Formats an amount as US dollars with two fraction digits and thousands
/// separators, e.g. `1234.5` as `$1,234.50`.
///
/// Numbers and numeric strings are accepted. Anything else (absent, `null`,
/// non-numeric text, non-finite values, amounts too large to hold exact cents)
/// renders as an empty string, which keeps the corresponding table cell blank.
pub fn format_currency(value: Option<&Value>) -> String {
    value
        .and_then(amount)
        .and_then(format_amount)
        .unwrap_or_default()
}

/// Largest cent count an `f64` represents exactly (2^53).
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// Reads a currency amount from a number or a numeric string.
pub(crate) fn amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn format_amount(amount: f64) -> Option<String> {
    let cents = (amount.abs() * 100.0).round();
    if cents > MAX_EXACT_CENTS {
        return None;
    }
    let cents = cents as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    Some(format!("{sign}${}.{fraction:02}", group_thousands(dollars)))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
