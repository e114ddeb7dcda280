use crate::currency::amount;
use crate::{format_currency, items, text};
use serde_json::Value;

/// Number of display columns in the transaction table.
pub const TRANSACTION_COLUMNS: usize = 7;

pub const EMPTY_TRANSACTIONS_TEXT: &str = "No transactions recorded.";

/// Renders the body rows of the transaction table.
///
/// Columns: date, description, reference, category, debit, credit, balance.
/// An absent or empty sequence renders a single row spanning all columns, so
/// the table body is never empty.
pub fn render_transaction_rows(transactions: Option<&Value>) -> String {
    let rows = items(transactions);
    if rows.is_empty() {
        return format!(
            "<tr class=\"empty-state\"><td colspan=\"{TRANSACTION_COLUMNS}\">{EMPTY_TRANSACTIONS_TEXT}</td></tr>"
        );
    }

    let mut html = String::new();
    for row in rows {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"amount\">{}</td><td class=\"amount\">{}</td><td class=\"amount\">{}</td></tr>",
            row_class(row),
            text(row, "date"),
            text(row, "description"),
            text(row, "reference"),
            text(row, "category"),
            format_currency(row.get("debit")),
            format_currency(row.get("credit")),
            format_currency(row.get("balance")),
        ));
    }
    html
}

/// A row is a credit when it carries a positive credit and no debit amount.
/// Amounts are read the same way the cells format them.
fn row_class(row: &Value) -> &'static str {
    let positive = |field: &str| {
        row.get(field)
            .and_then(amount)
            .is_some_and(|v| v > 0.0)
    };
    if positive("credit") && !positive("debit") {
        "credit"
    } else {
        "debit"
    }
}
