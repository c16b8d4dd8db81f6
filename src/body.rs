//! Body text assembly.
//!
//! Picks the first body strategy that yields text, then normalizes the
//! lines: marker lines always survive, other lines are deduplicated by
//! their case- and whitespace-folded form, and blank runs are collapsed.

use std::collections::HashSet;

use dom_query::Document;
use tracing::{debug, info};

use crate::dom;
use crate::fetch::FetchedPage;
use crate::options::Options;
use crate::patterns::{MARKER_LINE, MULTIPLE_NEWLINES, POST_VIEW_ID};
use crate::selector::body::{find_all, is_main_container, BodyContext, BODY_STRATEGIES};
use crate::selector::first_success;

/// Assemble the body text of a fetched page.
///
/// Returns `None` when no strategy finds any text.
#[must_use]
pub fn assemble_body(page: &FetchedPage, options: &Options) -> Option<String> {
    let doc = page.document();
    assemble_body_from_document(&doc, options)
}

/// Assemble the body text of an already parsed document.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::{body, dom, Options};
///
/// let doc = dom::parse(r#"<div class="se-main-container"><p>Hi</p><p>hi</p><img src="a"></div>"#);
/// let text = body::assemble_body_from_document(&doc, &Options::default());
/// assert_eq!(text.as_deref(), Some("Hi\n[Image 1]"));
/// ```
#[must_use]
pub fn assemble_body_from_document(doc: &Document, options: &Options) -> Option<String> {
    let ctx = BodyContext { doc, options };
    let Some(candidate) = first_success(&BODY_STRATEGIES, &ctx) else {
        info!("no body strategy matched");
        return None;
    };

    let text = normalize_lines(&candidate.text);
    debug!(
        strategy = %candidate.strategy,
        raw_chars = candidate.text.chars().count(),
        final_chars = text.chars().count(),
        "body assembled"
    );
    Some(text)
}

/// Line post-processing applied to the chosen strategy's text.
///
/// - marker lines (`[Image 3]`) are kept unconditionally
/// - other lines are kept trimmed on their first occurrence only,
///   compared lowercase with whitespace runs collapsed
/// - a blank line is kept only after a non-blank one
/// - three or more newlines collapse to two and the result is trimmed
#[must_use]
pub fn normalize_lines(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if kept.last().is_some_and(|last| !last.is_empty()) {
                kept.push("");
            }
            continue;
        }
        if MARKER_LINE.is_match(trimmed) {
            kept.push(trimmed);
            continue;
        }
        if seen.insert(dom::collapse_whitespace(&trimmed.to_lowercase())) {
            kept.push(trimmed);
        }
    }

    let joined = kept.join("\n");
    MULTIPLE_NEWLINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

/// Number of editor main containers in the page.
#[must_use]
pub fn count_main_containers(doc: &Document) -> usize {
    find_all(doc, is_main_container).len()
}

/// Number of `post-view<post_id>` containers in the page.
///
/// Lookups, first non-zero wins: exact `div` id, case-insensitive `div` id,
/// `div` id containing both `post-view` and `post_id`, then any element
/// with the exact id.
#[must_use]
pub fn count_post_view_containers(doc: &Document, post_id: &str) -> usize {
    let target = format!("{POST_VIEW_ID}{post_id}");
    let target_lower = target.to_lowercase();
    let root = doc.select("html");

    let exact = dom::select_where(&root, "div", |s| dom::id(s).as_deref() == Some(target.as_str()));
    if !exact.is_empty() {
        return exact.len();
    }

    let folded = dom::select_where(&root, "div", |s| {
        dom::id(s).is_some_and(|id| id.to_lowercase() == target_lower)
    });
    if !folded.is_empty() {
        return folded.len();
    }

    let containing = dom::select_where(&root, "div", |s| {
        dom::id(s).is_some_and(|id| id.to_lowercase().contains(POST_VIEW_ID) && id.contains(post_id))
    });
    if !containing.is_empty() {
        return containing.len();
    }

    dom::select_where(&root, "*", |s| dom::id(s).as_deref() == Some(target.as_str())).len()
}
