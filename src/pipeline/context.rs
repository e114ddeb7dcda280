use folio_fragments::render_footer;
use folio_template_core::TokenMapping;
use serde::Serialize;

/// Pagination state visible to the template under the `render.*` tokens.
///
/// Produced only by the pagination controller. The statement record never
/// carries one, though it may carry a default page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub is_single_page: bool,
    pub page_count: Option<usize>,
}

impl RenderContext {
    /// The context of the first pass, rendered before anything is known about pagination.
    pub fn provisional() -> Self {
        Self {
            is_single_page: false,
            page_count: None,
        }
    }

    /// The context of the final pass.
    ///
    /// A document is single-page only when the probe reported exactly one page.
    /// When the probe failed, `fallback` supplies the page count.
    pub fn resolve(probed: Option<usize>, fallback: Option<usize>) -> Self {
        match probed {
            Some(count) => Self {
                is_single_page: count == 1,
                page_count: Some(count),
            },
            None => Self {
                is_single_page: false,
                page_count: fallback,
            },
        }
    }

    pub fn page_class(&self) -> &'static str {
        if self.is_single_page {
            "single-page"
        } else {
            "multi-page"
        }
    }

    /// Tokens contributed by this context. `render.pageCount` is only present
    /// when a count is known, so its marker passes through otherwise.
    pub fn tokens(&self) -> TokenMapping {
        let mut tokens = TokenMapping::new();
        tokens.insert("render.isSinglePage", self.is_single_page.to_string());
        if let Some(count) = self.page_count {
            tokens.insert("render.pageCount", count.to_string());
        }
        tokens.insert("render.pageClass", self.page_class());
        tokens.insert(
            "render.footerHtml",
            render_footer(self.is_single_page, self.page_count),
        );
        tokens
    }
}
