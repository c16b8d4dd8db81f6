//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate exposing exactly the capabilities the
//! scraper consumes: attribute access, token predicates on `class`/`id`,
//! nearest-ancestor lookup, and text linearization with a block separator.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::patterns::WHITESPACE_NORMALIZE;

/// Elements whose text never counts as visible content.
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Whether the raw `class` attribute contains `token` as a substring.
///
/// `se-module-image` also matches `se-module-image-link`.
#[must_use]
pub fn class_contains(sel: &Selection, token: &str) -> bool {
    sel.attr("class").is_some_and(|c| c.contains(token))
}

/// Case-insensitive substring test on the `id` attribute.
#[must_use]
pub fn id_contains_ignore_case(sel: &Selection, token: &str) -> bool {
    sel.attr("id")
        .is_some_and(|v| v.to_lowercase().contains(&token.to_lowercase()))
}

/// Case-insensitive substring test on the `class` attribute.
#[must_use]
pub fn class_contains_ignore_case(sel: &Selection, token: &str) -> bool {
    sel.attr("class")
        .is_some_and(|v| v.to_lowercase().contains(&token.to_lowercase()))
}

/// Whitespace-separated `class` tokens followed by the `id`, if any.
#[must_use]
pub fn class_and_id_tokens(sel: &Selection) -> Vec<String> {
    let mut tokens: Vec<String> = class_name(sel)
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(id) = id(sel) {
        if !id.trim().is_empty() {
            tokens.push(id.trim().to_string());
        }
    }
    tokens
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Whether the selection's first node is one of `tags`.
#[must_use]
pub fn has_tag(sel: &Selection, tags: &[&str]) -> bool {
    tag_name(sel).is_some_and(|t| tags.contains(&t.as_str()))
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Collect every visible text node under `node` in document order.
///
/// Script, style, noscript and template subtrees are skipped. The walk keeps
/// an explicit stack, so nesting depth is bounded only by memory.
pub fn collect_text_nodes(node: &NodeRef, out: &mut Vec<String>) {
    let mut stack: Vec<NodeRef> = node.children().into_iter().rev().collect();
    while let Some(current) = stack.pop() {
        if current.is_text() {
            out.push(current.text().to_string());
        } else if current.is_element() {
            let skip = current
                .node_name()
                .is_some_and(|n| NON_TEXT_ELEMENTS.iter().any(|t| n.eq_ignore_ascii_case(t)));
            if !skip {
                stack.extend(current.children().into_iter().rev());
            }
        }
    }
}

/// Linearize a subtree: strip every text node, drop empty ones, join with `separator`.
#[must_use]
pub fn text_with_separator(sel: &Selection, separator: &str) -> String {
    let Some(root) = sel.nodes().first() else {
        return String::new();
    };
    let mut pieces = Vec::new();
    collect_text_nodes(root, &mut pieces);
    join_stripped(&pieces, separator)
}

/// Strip each piece, drop empty ones, and join the rest with `separator`.
#[must_use]
pub fn join_stripped<S: AsRef<str>>(pieces: &[S], separator: &str) -> String {
    pieces
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Text joined by single spaces with internal whitespace collapsed.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    collapse_whitespace(&text_with_separator(sel, " "))
}

/// Collapse whitespace runs to a single space and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

// === Tree Navigation ===

/// Nearest ancestor (excluding the node itself) for which `predicate` holds.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::dom;
///
/// let doc = dom::parse(r#"<li class="item"><div><a href="/x">x</a></div></li>"#);
/// let link = doc.select("a");
/// let li = dom::nearest_ancestor_matching(&link, |s| dom::has_tag(s, &["li"]));
/// assert!(li.is_some());
/// ```
#[must_use]
pub fn nearest_ancestor_matching<'a, F>(sel: &Selection<'a>, predicate: F) -> Option<Selection<'a>>
where
    F: Fn(&Selection<'a>) -> bool,
{
    let mut current = sel.nodes().first()?.parent();
    while let Some(node) = current {
        if node.is_element() {
            let candidate = Selection::from(node);
            if predicate(&candidate) {
                return Some(candidate);
            }
        }
        current = node.parent();
    }
    None
}

/// Nearest ancestor whose tag is one of `tags`.
#[must_use]
pub fn nearest_ancestor_with_tag<'a>(sel: &Selection<'a>, tags: &[&str]) -> Option<Selection<'a>> {
    nearest_ancestor_matching(sel, |s| has_tag(s, tags))
}

// === Querying ===

/// All elements matching `css` under `root` that also satisfy `predicate`, in document order.
#[must_use]
pub fn select_where<'a, F>(root: &Selection<'a>, css: &str, predicate: F) -> Vec<Selection<'a>>
where
    F: Fn(&Selection<'a>) -> bool,
{
    root.select(css)
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .filter(|s| predicate(s))
        .collect()
}

/// First element matching `css` under `root` that satisfies `predicate`.
#[must_use]
pub fn select_first_where<'a, F>(root: &Selection<'a>, css: &str, predicate: F) -> Option<Selection<'a>>
where
    F: Fn(&Selection<'a>) -> bool,
{
    root.select(css)
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .find(|s| predicate(s))
}

// === Tree Manipulation ===

/// Deep copy of a document, so removals leave the original intact.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}


#[cfg(test)]
mod strtendril_verification {
    use super::*;

    #[test]
    fn test_strtendril_deref_to_str() {
        let doc = parse("<p>hello world</p>");
        let text = text_content(&doc.select("p"));

        assert!(text.starts_with("hello"));
        assert_eq!(text.len(), 11);
        let _: &str = &text;
    }
}
