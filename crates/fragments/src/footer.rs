/// Renders the statement footer for the given pagination state.
///
/// The single-page variant carries no page numbering. The multi-page variant
/// exposes a `page-number` span for the renderer's running page counter and,
/// when the total is known, the page total.
pub fn render_footer(is_single_page: bool, page_count: Option<usize>) -> String {
    if is_single_page {
        return "<footer class=\"statement-footer statement-footer--single\"></footer>".to_string();
    }
    match page_count {
        Some(total) => format!(
            "<footer class=\"statement-footer statement-footer--multi\">Page <span class=\"page-number\"></span> of {total}</footer>"
        ),
        None => "<footer class=\"statement-footer statement-footer--multi\">Page <span class=\"page-number\"></span></footer>"
            .to_string(),
    }
}
