use folio_fragments::render_fragments;
use folio_template_core::{TokenMapping, flatten};
use serde_json::Value;

/// Location of the record's own default page count.
const DEFAULT_PAGE_COUNT_POINTER: &str = "/pagination/defaultPageCount";

/// Tokens shared by both passes: the flattened record plus every fragment.
///
/// Fragments are merged last, so a scalar that happens to share a synthetic
/// path (`transactions.rows`, ...) is replaced by the rendered markup.
pub fn statement_tokens(record: &Value) -> TokenMapping {
    let mut tokens = flatten(record);
    tokens.merge(render_fragments(record));
    tokens
}

/// The page count to use when the probe fails: the configured one, else the
/// record's `pagination.defaultPageCount`. Zero counts are ignored.
pub fn fallback_page_count(configured: Option<usize>, record: &Value) -> Option<usize> {
    configured
        .filter(|&count| count > 0)
        .or_else(|| {
            record
                .pointer(DEFAULT_PAGE_COUNT_POINTER)
                .and_then(Value::as_u64)
                .and_then(|count| usize::try_from(count).ok())
                .filter(|&count| count > 0)
        })
}
