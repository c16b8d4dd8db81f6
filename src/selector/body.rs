//! Body container rules and the four body strategies.
//!
//! Strategies are tried in decreasing confidence: editor main container,
//! legacy `post-view` container, loose id/class heuristics, and finally the
//! whole page with chrome stripped.

use std::fmt;

use dom_query::{Document, Selection};

use super::{query_all, Rule};
use crate::dom;
use crate::markers::extract_with_markers;
use crate::options::Options;
use crate::patterns::{MAIN_CONTAINER_CLASS, POST_VIEW_ID};

/// Elements stripped before the whole-page strategy.
const PAGE_CHROME: &str = "script, style, nav, header, footer, aside";

/// Which strategy produced a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStrategy {
    MainContainer,
    PostView,
    LooseContainer,
    WholePage,
}

impl fmt::Display for BodyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MainContainer => "main-container",
            Self::PostView => "post-view",
            Self::LooseContainer => "loose-container",
            Self::WholePage => "whole-page",
        })
    }
}

/// Input shared by all body strategies.
pub struct BodyContext<'a> {
    pub doc: &'a Document,
    pub options: &'a Options,
}

/// Raw text from one strategy, before line post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCandidate {
    pub strategy: BodyStrategy,
    pub text: String,
}

/// Signature shared by the body strategies.
pub type BodyStrategyFn = fn(&BodyContext<'_>) -> Option<BodyCandidate>;

/// Strategies in the order they are tried.
pub const BODY_STRATEGIES: [BodyStrategyFn; 4] =
    [main_container, post_view, loose_container, whole_page];

// === Rules ===

/// Any element whose class contains the editor main-container token.
pub fn is_main_container(sel: &Selection) -> bool {
    dom::class_contains(sel, MAIN_CONTAINER_CLASS)
}

/// A `div` whose id contains `post-view`, ignoring case.
pub fn is_post_view(sel: &Selection) -> bool {
    dom::has_tag(sel, &["div"]) && dom::id_contains_ignore_case(sel, POST_VIEW_ID)
}

fn div_id_has_post(sel: &Selection) -> bool {
    dom::has_tag(sel, &["div"]) && dom::id_contains_ignore_case(sel, "post")
}

fn div_class_has_post(sel: &Selection) -> bool {
    dom::has_tag(sel, &["div"]) && dom::class_contains_ignore_case(sel, "post")
}

fn div_class_has_content(sel: &Selection) -> bool {
    dom::has_tag(sel, &["div"]) && dom::class_contains_ignore_case(sel, "content")
}

fn div_class_has_article(sel: &Selection) -> bool {
    dom::has_tag(sel, &["div"]) && dom::class_contains_ignore_case(sel, "article")
}

/// Loose container heuristics, tried in order.
pub const LOOSE_RULES: [Rule; 4] = [
    div_id_has_post,
    div_class_has_post,
    div_class_has_content,
    div_class_has_article,
];

/// All elements of `doc` matching `rule`, in document order.
pub fn find_all<'a>(doc: &'a Document, rule: Rule) -> Vec<Selection<'a>> {
    query_all(&doc.select("html"), rule)
}

/// First candidate in `candidates` whose marker text satisfies `accept`.
fn first_extracted<'a>(
    candidates: &[Selection<'a>],
    options: &Options,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    candidates
        .iter()
        .map(|sel| extract_with_markers(sel, options))
        .find(|text| accept(text))
}

// === Strategies ===

/// Strategy 1: first editor main container with non-empty text.
pub fn main_container(ctx: &BodyContext<'_>) -> Option<BodyCandidate> {
    let containers = find_all(ctx.doc, is_main_container);
    first_extracted(&containers, ctx.options, |t| !t.trim().is_empty()).map(|text| BodyCandidate {
        strategy: BodyStrategy::MainContainer,
        text,
    })
}

/// Strategy 2: first `post-view` container with non-empty text.
pub fn post_view(ctx: &BodyContext<'_>) -> Option<BodyCandidate> {
    let containers = find_all(ctx.doc, is_post_view);
    first_extracted(&containers, ctx.options, |t| !t.trim().is_empty()).map(|text| BodyCandidate {
        strategy: BodyStrategy::PostView,
        text,
    })
}

/// Strategy 3: loose id/class heuristics, first text above the length floor.
pub fn loose_container(ctx: &BodyContext<'_>) -> Option<BodyCandidate> {
    let floor = ctx.options.loose_container_threshold;
    LOOSE_RULES.iter().find_map(|rule| {
        let candidates = find_all(ctx.doc, *rule);
        first_extracted(&candidates, ctx.options, |t| t.trim().chars().count() > floor).map(|text| {
            BodyCandidate {
                strategy: BodyStrategy::LooseContainer,
                text,
            }
        })
    })
}

/// Strategy 4: whole `<body>` with page chrome removed, short lines dropped.
///
/// Works on a copy so the page document stays intact.
pub fn whole_page(ctx: &BodyContext<'_>) -> Option<BodyCandidate> {
    let copy = dom::clone_document(ctx.doc);
    copy.select(PAGE_CHROME).remove();

    let body = copy.select("body");
    if !body.exists() {
        return None;
    }

    let floor = ctx.options.fallback_line_threshold;
    let text = extract_with_markers(&body, ctx.options);
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > floor)
        .collect();

    if lines.is_empty() {
        return None;
    }
    Some(BodyCandidate {
        strategy: BodyStrategy::WholePage,
        text: lines.join("\n"),
    })
}
