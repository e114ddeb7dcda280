//! HTML fragment renderers for the sequence-typed parts of a statement.
//!
//! The flattener never emits tokens for sequences. Each renderer here turns one
//! sequence into a single markup string which is inserted into the token mapping
//! under a synthetic path (`transactions.rows`, `customer.addressHtml`, ...).
//!
//! Values are interpolated without escaping: the statement record is trusted input.
//!
//! ## Available Renderers
//!
//! - [`render_address`]: Address lines joined with `<br>`
//! - [`render_transaction_rows`]: Seven-column transaction table body, with an empty-state row
//! - [`render_balance_rows`]: Label / amount rows
//! - [`render_summary_rows`]: Label / amount rows with emphasis and divider classes
//! - [`render_footer`]: Single-page or multi-page footer variant

mod address;
mod currency;
mod footer;
mod rows;
mod transactions;

pub use address::render_address;
pub use currency::format_currency;
pub use footer::render_footer;
pub use rows::{render_balance_rows, render_summary_rows};
pub use transactions::{EMPTY_TRANSACTIONS_TEXT, TRANSACTION_COLUMNS, render_transaction_rows};

use folio_template_core::TokenMapping;
use serde_json::Value;

/// Address sequences and the tokens their markup is stored under.
const ADDRESS_FIELDS: &[(&str, &str)] = &[
    ("/customer/address", "customer.addressHtml"),
    ("/institution/address", "institution.addressHtml"),
];

/// Renders every sequence-backed fragment of a statement record.
pub fn render_fragments(record: &Value) -> TokenMapping {
    let mut tokens = TokenMapping::new();

    for (pointer, token) in ADDRESS_FIELDS {
        tokens.insert(*token, render_address(record.pointer(pointer)));
    }
    tokens.insert(
        "transactions.rows",
        render_transaction_rows(record.get("transactions")),
    );
    tokens.insert("balances.rows", render_balance_rows(record.get("balances")));
    tokens.insert("summary.rows", render_summary_rows(record.get("summary")));

    log::debug!("Rendered {} fragment tokens.", tokens.len());
    tokens
}

/// Returns the elements of `value` when it is an array, or an empty slice.
fn items(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Stringifies a scalar cell value. Missing, null and non-scalar values are empty.
fn text(row: &Value, field: &str) -> String {
    match row.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn flag(row: &Value, field: &str) -> bool {
    row.get(field).and_then(Value::as_bool).unwrap_or(false)
}
