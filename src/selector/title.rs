//! Title heuristics for search-result links.
//!
//! Each heuristic looks at the link and its nearest structural block and
//! returns a title only when it is longer than the configured floor. They
//! run in order through [`super::first_success`]; the last resort (fetching
//! the post itself) lives in [`title_from_page`] and is driven by the search
//! parser since it needs the network.

use dom_query::{Document, Selection};

use crate::dom;
use crate::options::Options;
use crate::patterns::{
    BODY_SPAN_CLASS, BREADCRUMB_SEPARATOR, DATE_TEXT, HEADLINE_SPAN_CLASS, LINE_CLAMP_CLASS,
    STYLED_SPAN_CLASS, THEMED_FONT_FAMILY_CLASS, THEMED_FONT_SIZE_PREFIX,
};

/// Block elements that delimit one search result for title lookup.
pub const TITLE_BLOCK_TAGS: &[&str] = &["div", "li", "dt", "dd", "article", "section"];

/// Link attributes that may carry a title, in order.
const TITLE_ATTRIBUTES: &[&str] = &["data-title", "title", "aria-label"];

/// Tags that may carry the line-clamp title class.
const LINE_CLAMP_TAGS: &str = "a, span, strong, b";

/// A search-result link and the block around it.
pub struct TitleContext<'a> {
    pub link: Selection<'a>,
    pub block: Option<Selection<'a>>,
    pub options: &'a Options,
}

impl<'a> TitleContext<'a> {
    #[must_use]
    pub fn new(link: Selection<'a>, options: &'a Options) -> Self {
        let block = dom::nearest_ancestor_with_tag(&link, TITLE_BLOCK_TAGS);
        Self {
            link,
            block,
            options,
        }
    }

    /// `Some(text)` when `text` clears the title length floor.
    fn accept(&self, text: String) -> Option<String> {
        (text.chars().count() > self.options.title_min_exclusive).then_some(text)
    }

    /// Whether `text` looks like a URL or breadcrumb rather than a title.
    fn looks_like_breadcrumb(&self, text: &str) -> bool {
        text.contains(self.options.blog_host.as_str()) || text.contains(BREADCRUMB_SEPARATOR)
    }
}

/// Signature shared by the static title heuristics.
pub type TitleStrategyFn = fn(&TitleContext<'_>) -> Option<String>;

/// Static heuristics in the order they are tried.
pub const TITLE_STRATEGIES: [TitleStrategyFn; 6] = [
    headline_span,
    styled_span,
    themed_span,
    line_clamped,
    link_text,
    link_attribute,
];

fn is_headline_span(sel: &Selection) -> bool {
    dom::class_contains(sel, HEADLINE_SPAN_CLASS)
}

fn is_themed_span(sel: &Selection) -> bool {
    dom::class_contains(sel, THEMED_FONT_SIZE_PREFIX) && dom::class_contains(sel, THEMED_FONT_FAMILY_CLASS)
}

fn is_line_clamped(sel: &Selection) -> bool {
    dom::class_contains(sel, LINE_CLAMP_CLASS)
}

/// Headline-styled span in the result block, emphasized parts included.
pub fn headline_span(ctx: &TitleContext<'_>) -> Option<String> {
    let block = ctx.block.as_ref()?;
    let span = dom::select_first_where(block, "span", is_headline_span)?;
    ctx.accept(dom::normalized_text(&span))
}

/// First other styled span that is not body text, a URL, or a breadcrumb.
pub fn styled_span(ctx: &TitleContext<'_>) -> Option<String> {
    let block = ctx.block.as_ref()?;
    dom::select_where(block, "span", |s| {
        dom::class_contains(s, STYLED_SPAN_CLASS) && !dom::class_contains(s, BODY_SPAN_CLASS)
    })
    .iter()
    .map(dom::normalized_text)
    .filter(|text| !ctx.looks_like_breadcrumb(text))
    .find_map(|text| ctx.accept(text))
}

/// Editor title span with the themed font classes.
pub fn themed_span(ctx: &TitleContext<'_>) -> Option<String> {
    let block = ctx.block.as_ref()?;
    let span = dom::select_first_where(block, "span", is_themed_span)?;
    ctx.accept(dom::normalized_text(&span))
}

/// Line-clamped title element inside the link, then inside the block.
pub fn line_clamped(ctx: &TitleContext<'_>) -> Option<String> {
    let in_link = dom::select_first_where(&ctx.link, LINE_CLAMP_TAGS, is_line_clamped)
        .and_then(|el| ctx.accept(dom::normalized_text(&el)));
    if in_link.is_some() {
        return in_link;
    }
    let block = ctx.block.as_ref()?;
    let el = dom::select_first_where(block, LINE_CLAMP_TAGS, is_line_clamped)?;
    ctx.accept(dom::normalized_text(&el))
}

/// The link's own text with embedded dates removed.
pub fn link_text(ctx: &TitleContext<'_>) -> Option<String> {
    let text = dom::text_with_separator(&ctx.link, " ");
    if ctx.looks_like_breadcrumb(&text) {
        return None;
    }
    let cleaned = dom::collapse_whitespace(&DATE_TEXT.replace_all(&text, ""));
    ctx.accept(cleaned)
}

/// Title-like attributes on the link.
pub fn link_attribute(ctx: &TitleContext<'_>) -> Option<String> {
    TITLE_ATTRIBUTES
        .iter()
        .filter_map(|name| dom::get_attribute(&ctx.link, name))
        .map(|value| value.trim().to_string())
        .find_map(|value| ctx.accept(value))
}

/// Title found inside a fetched post page.
///
/// Themed editor span first, then the headline span; when the page has no
/// headline span, the first styled span is used only if it contains a
/// highlighted `<mark>`.
#[must_use]
pub fn title_from_page(doc: &Document, options: &Options) -> Option<String> {
    let root = doc.select("html");
    let accept = |text: String| (text.chars().count() > options.title_min_exclusive).then_some(text);

    if let Some(title) = dom::select_first_where(&root, "span", is_themed_span)
        .and_then(|span| accept(dom::normalized_text(&span)))
    {
        return Some(title);
    }

    if let Some(span) = dom::select_first_where(&root, "span", is_headline_span) {
        return accept(dom::normalized_text(&span));
    }

    let span = dom::select_first_where(&root, "span", |s| dom::class_contains(s, STYLED_SPAN_CLASS))?;
    if !span.select("mark").exists() {
        return None;
    }
    accept(dom::normalized_text(&span))
}

/// Trim and truncate to at most `max_chars` characters; the cut is trimmed again.
#[must_use]
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    let cut: String = title.trim().chars().take(max_chars).collect();
    cut.trim_end().to_string()
}
