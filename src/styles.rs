//! Embeds stylesheet content into a rendered document.

use folio_resource::{ResourceError, ResourceProvider};
use itertools::Itertools;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static STYLESHEET_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b[^>]*\brel\s*=\s*["']?stylesheet\b[^>]*>"#)
        .expect("stylesheet link pattern is valid")
});

/// Replaces `<link rel="stylesheet">` references with one embedded `<style>` block.
#[derive(Debug, Clone, Default)]
pub struct StyleInliner {
    sources: Vec<String>,
}

impl StyleInliner {
    pub fn new(sources: Vec<String>) -> Self {
        Self { sources }
    }

    /// Loads every `.css` resource of `provider` in name order.
    pub fn from_provider(provider: &dyn ResourceProvider) -> Result<Self, ResourceError> {
        let names = provider.list("css")?;
        log::debug!(
            "Inlining {} stylesheet(s) from {}: {:?}",
            names.len(),
            provider.name(),
            names
        );
        let sources = names
            .iter()
            .map(|name| provider.load_text(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(sources))
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Inlines the stylesheets into `html`.
    ///
    /// The first stylesheet link becomes a `<style>` block indented to the
    /// link's column, and every later link is removed. Documents without links,
    /// and inliners without sources, leave `html` unchanged.
    pub fn inline(&self, html: &str) -> String {
        if self.is_empty() {
            return html.to_string();
        }
        let mut links = STYLESHEET_LINK_RE.find_iter(html).map(|m| m.range());
        let Some(first) = links.next() else {
            return html.to_string();
        };

        let indent = line_indent(html, first.start);
        let mut out = String::with_capacity(html.len() + self.sources.iter().map(String::len).sum::<usize>());
        out.push_str(&html[..first.start]);
        out.push_str(&self.style_block(&indent));

        let mut cursor = first.end;
        for link in links {
            let removed = whole_line(html, link);
            out.push_str(&html[cursor..removed.start]);
            cursor = removed.end;
        }
        out.push_str(&html[cursor..]);
        out
    }

    fn style_block(&self, indent: &str) -> String {
        let body = self
            .sources
            .iter()
            .flat_map(|source| source.trim_end().lines())
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("{indent}  {line}")
                }
            })
            .join("\n");
        format!("<style>\n{body}\n{indent}</style>")
    }
}

fn line_start(html: &str, offset: usize) -> usize {
    html[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Whitespace that precedes `offset` on its line. Non-whitespace text before
/// the link is replaced by spaces of the same width.
fn line_indent(html: &str, offset: usize) -> String {
    html[line_start(html, offset)..offset]
        .chars()
        .map(|c| if c.is_whitespace() { c } else { ' ' })
        .collect()
}

/// Widens `link` to its whole line (including the newline) when the link is
/// the only thing on that line.
fn whole_line(html: &str, link: Range<usize>) -> Range<usize> {
    let start = line_start(html, link.start);
    let end = html[link.end..]
        .find('\n')
        .map_or(html.len(), |i| link.end + i + 1);
    let alone = html[start..link.start].trim().is_empty() && html[link.end..end].trim().is_empty();
    if alone { start..end } else { link }
}
