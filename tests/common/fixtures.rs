use serde_json::{Value, json};

/// The sample template shipped with the project.
pub fn statement_template() -> &'static str {
    include_str!("../../templates/statement.html")
}

/// The sample statement shipped with the project. Every template marker except
/// `render.pageCount` is backed by a value.
pub fn full_statement() -> Value {
    serde_json::from_str(include_str!("../../data/statement.json")).unwrap()
}

/// The sample statement with `pagination` removed, so no record default applies.
pub fn statement_without_default_page_count() -> Value {
    let mut record = full_statement();
    record.as_object_mut().unwrap().remove("pagination");
    record
}

/// The sample statement with one field replaced by `null`.
pub fn statement_with_null(section: &str, field: &str) -> Value {
    let mut record = full_statement();
    record[section][field] = Value::Null;
    record
}

/// A statement whose transaction list is empty.
pub fn statement_without_transactions() -> Value {
    let mut record = full_statement();
    record["transactions"] = json!([]);
    record
}

/// A template that only depends on pagination tokens.
pub fn pagination_template() -> &'static str {
    "<body class=\"{{render.pageClass}}\" data-single=\"{{render.isSinglePage}}\" data-count=\"{{render.pageCount}}\">{{render.footerHtml}}</body>"
}
