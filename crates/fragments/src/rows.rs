use crate::{flag, format_currency, items, text};
use serde_json::Value;

/// Renders `{label, amount, emphasize?}` rows for the balances table.
pub fn render_balance_rows(balances: Option<&Value>) -> String {
    let mut html = String::new();
    for row in items(balances) {
        let class = if flag(row, "emphasize") {
            "balance-row emphasis"
        } else {
            "balance-row"
        };
        html.push_str(&format!(
            "<tr class=\"{class}\"><th scope=\"row\">{}</th><td class=\"amount\">{}</td></tr>",
            text(row, "label"),
            emphasized(row, format_currency(row.get("amount"))),
        ));
    }
    html
}

/// Renders `{label, amount, emphasize?, divider?}` rows for the summary table.
pub fn render_summary_rows(summary: Option<&Value>) -> String {
    let mut html = String::new();
    for row in items(summary) {
        let mut class = String::from("summary-row");
        if flag(row, "emphasize") {
            class.push_str(" emphasis");
        }
        if flag(row, "divider") {
            class.push_str(" divider");
        }
        html.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td><td class=\"amount\">{}</td></tr>",
            emphasized(row, text(row, "label")),
            emphasized(row, format_currency(row.get("amount"))),
        ));
    }
    html
}

fn emphasized(row: &Value, content: String) -> String {
    if flag(row, "emphasize") && !content.is_empty() {
        format!("<strong>{content}</strong>")
    } else {
        content
    }
}
