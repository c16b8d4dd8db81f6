//! Media-marker text extraction.
//!
//! Linearizes a content subtree to newline-separated text while replacing
//! embedded media with positional markers:
//!
//! - images inside a sticker module become `[Sticker N]`
//! - images anywhere else become `[Image N]`
//! - a link-preview module collapses to a single `[Link N]`
//! - a plain hyperlink becomes its text followed by `[Link N]` on the next line
//!
//! Links inside sticker or image modules are unwrapped: their text is kept
//! as one run and no marker is emitted. Only `div` elements open a module;
//! module rules are checked per element with precedence sticker, image,
//! link preview.
//!
//! The walk is a single pass in document order over the original tree, so
//! numbering always follows reading order and the input is never mutated.
//! Each call owns one [`MarkerCounter`].

use std::fmt;

use dom_query::{NodeRef, Selection};
use tracing::debug;

use crate::dom;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::{IMAGE_MODULE_CLASS, LINK_PREVIEW_MODULE_CLASS, MARKER_LINE, STICKER_MODULE_CLASS};

/// Elements whose text is never part of the output.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Kind of media marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Image,
    Link,
    Sticker,
}

impl MarkerKind {
    /// Label used inside the brackets.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Link => "Link",
            Self::Sticker => "Sticker",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-call marker counters. Each kind counts independently from 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounter {
    pub image: usize,
    pub link: usize,
    pub sticker: usize,
}

impl MarkerCounter {
    /// Advance the counter for `kind` and render its marker.
    pub fn next_marker(&mut self, kind: MarkerKind) -> String {
        let slot = match kind {
            MarkerKind::Image => &mut self.image,
            MarkerKind::Link => &mut self.link,
            MarkerKind::Sticker => &mut self.sticker,
        };
        *slot += 1;
        format!("[{kind} {}]", *slot)
    }
}

/// Text produced by one marker walk together with its final counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText {
    pub text: String,
    pub counts: MarkerCounter,
}

/// Module context inherited by descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Plain,
    Sticker,
    Image,
}

struct MarkerWalk {
    counter: MarkerCounter,
    max_depth: usize,
}

impl MarkerWalk {
    fn visit(&mut self, node: &NodeRef, scope: Scope, depth: usize, out: &mut Vec<String>) -> Result<()> {
        if node.is_text() {
            out.push(node.text().to_string());
            return Ok(());
        }
        if !node.is_element() {
            return self.visit_children(node, scope, depth, out);
        }
        if depth > self.max_depth {
            return Err(Error::Extraction(format!(
                "element nesting exceeds {} levels",
                self.max_depth
            )));
        }

        let name = node
            .node_name()
            .map(|n| n.to_ascii_lowercase())
            .unwrap_or_default();
        if SKIPPED_ELEMENTS.contains(&name.as_str()) {
            return Ok(());
        }

        let sel = Selection::from(*node);
        let is_module = name == "div";
        let scope = if is_module && dom::class_contains(&sel, STICKER_MODULE_CLASS) {
            Scope::Sticker
        } else if is_module && scope != Scope::Sticker && dom::class_contains(&sel, IMAGE_MODULE_CLASS) {
            Scope::Image
        } else if is_module && dom::class_contains(&sel, LINK_PREVIEW_MODULE_CLASS) {
            out.push(self.counter.next_marker(MarkerKind::Link));
            return Ok(());
        } else {
            scope
        };

        match name.as_str() {
            "img" => {
                let kind = if scope == Scope::Sticker {
                    MarkerKind::Sticker
                } else {
                    MarkerKind::Image
                };
                out.push(self.counter.next_marker(kind));
                Ok(())
            }
            "a" => {
                let mut inner = Vec::new();
                self.visit_children(node, scope, depth, &mut inner)?;
                let text = link_text(&inner);
                if scope != Scope::Plain {
                    out.push(text);
                    return Ok(());
                }
                let marker = self.counter.next_marker(MarkerKind::Link);
                if text.is_empty() {
                    out.push(marker);
                } else {
                    out.push(format!("{text}\n{marker}"));
                }
                Ok(())
            }
            _ => self.visit_children(node, scope, depth, out),
        }
    }

    fn visit_children(&mut self, node: &NodeRef, scope: Scope, depth: usize, out: &mut Vec<String>) -> Result<()> {
        for child in node.children() {
            self.visit(&child, scope, depth + 1, out)?;
        }
        Ok(())
    }
}

/// Text of a link as one run: text pieces joined by spaces, markers on their own lines.
fn link_text(pieces: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for piece in pieces.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if MARKER_LINE.is_match(piece) {
            lines.push(run.join(" "));
            run.clear();
            lines.push(piece.to_string());
        } else {
            run.push(piece);
        }
    }
    lines.push(run.join(" "));
    dom::join_stripped(&lines, "\n")
}

/// Run the marker walk over the first node of `sel`.
///
/// Fails only when the subtree nests deeper than `options.max_tree_depth`.
pub fn try_extract_with_markers(sel: &Selection, options: &Options) -> Result<MarkedText> {
    let Some(root) = sel.nodes().first() else {
        return Ok(MarkedText {
            text: String::new(),
            counts: MarkerCounter::default(),
        });
    };

    let mut walk = MarkerWalk {
        counter: MarkerCounter::default(),
        max_depth: options.max_tree_depth,
    };
    let mut pieces = Vec::new();
    walk.visit(root, Scope::Plain, 0, &mut pieces)?;

    Ok(MarkedText {
        text: dom::join_stripped(&pieces, "\n"),
        counts: walk.counter,
    })
}

/// Plain newline-separated text of `sel`, without markers.
#[must_use]
pub fn plain_text(sel: &Selection) -> String {
    dom::text_with_separator(sel, "\n")
}

/// Text of `sel` with media replaced by positional markers.
///
/// Falls back to [`plain_text`] when the walk fails or yields nothing.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::{dom, markers, Options};
///
/// let doc = dom::parse(r#"<div><img src="a.png"><a href="x">hello</a></div>"#);
/// let text = markers::extract_with_markers(&doc.select("div"), &Options::default());
/// assert_eq!(text, "[Image 1]\nhello\n[Link 1]");
/// ```
#[must_use]
pub fn extract_with_markers(sel: &Selection, options: &Options) -> String {
    try_extract_with_markers(sel, options)
        .inspect_err(|err| debug!(error = %err, "marker walk failed, using plain text"))
        .map(|marked| marked.text)
        .ok()
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| plain_text(sel))
}
