use itertools::Itertools;
use serde_json::Value;

/// Joins address lines with `<br>`. Blank and non-string lines are dropped.
pub fn render_address(lines: Option<&Value>) -> String {
    crate::items(lines)
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join("<br>")
}
