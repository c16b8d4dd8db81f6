//! Compiled regex patterns and class tokens used across the pipeline.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Tokens are grouped by the stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Editor Class Tokens
// =============================================================================

/// Class token of the main content container in the primary layout.
pub const MAIN_CONTAINER_CLASS: &str = "se-main-container";

/// Id token of the legacy post container (`post-view<logNo>`).
pub const POST_VIEW_ID: &str = "post-view";

/// Class token of sticker/emoji modules.
pub const STICKER_MODULE_CLASS: &str = "se-module-sticker";

/// Class token of plain image modules.
pub const IMAGE_MODULE_CLASS: &str = "se-module-image";

/// Class token of link-preview (open graph) modules.
pub const LINK_PREVIEW_MODULE_CLASS: &str = "se-module-oglink";

/// Id token of the embedded content frame.
pub const MAIN_FRAME_ID: &str = "mainframe";

// =============================================================================
// Search Result Tokens
// =============================================================================

/// Headline-styled title span on the search page.
pub const HEADLINE_SPAN_CLASS: &str = "sds-comps-text-type-headline1";

/// Any styled text span on the search page.
pub const STYLED_SPAN_CLASS: &str = "sds-comps-text";

/// Secondary/body styled span that never carries a title.
pub const BODY_SPAN_CLASS: &str = "sds-comps-text-type-body2";

/// Themed font-size class prefix of editor title spans.
pub const THEMED_FONT_SIZE_PREFIX: &str = "se-fs-";

/// Themed font-family class of editor title spans.
pub const THEMED_FONT_FAMILY_CLASS: &str = "se-ff-nanummaruburi";

/// Line-clamped text class used for titles in older result layouts.
pub const LINE_CLAMP_CLASS: &str = "api_txt_lines";

/// Breadcrumb separator that disqualifies a title candidate.
pub const BREADCRUMB_SEPARATOR: char = '›';

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches a single class/id token that marks an advertisement block.
///
/// Whole-token matches (`ad`, `ads`, `sponsored`, ...) plus `ad_`/`ad-`
/// prefixed tokens such as `ad_bx`, `ad_area`, `ad_wrap`.
pub static ADVERTISEMENT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(ad|ads|advert|advertisement|sponsor|sponsored|promo|promotion|광고)$|^ad[-_]|[-_]ad$|advertisement|sponsored|광고",
    )
    .expect("ADVERTISEMENT_TOKEN regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Matches multiple consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex"));

/// Matches `YYYY.MM.DD` / `YYYY-MM-DD` dates embedded in link text.
pub static DATE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}[.\-]\d{1,2}[.\-]\d{1,2}").expect("DATE_TEXT regex"));

/// Matches a line consisting solely of one media marker.
pub static MARKER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(Image|Link|Sticker) \d+\]$").expect("MARKER_LINE regex"));

// =============================================================================
// Keyword Preprocessing Patterns
// =============================================================================

/// Matches markup tags left in text.
pub static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("MARKUP_TAG regex"));

/// Matches http(s) URLs.
pub static URL_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL_TEXT regex"));

/// Matches e-mail-like tokens.
pub static EMAIL_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("EMAIL_TEXT regex"));

/// Matches media markers, with or without an index.
pub static MARKER_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:Image|Link|Sticker)\s*\d*\]").expect("MARKER_TEXT regex")
});

/// Matches anything that is neither a word character nor whitespace.
pub static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("NON_WORD regex"));

/// Matches word-like runs (Unicode aware, so Hangul is included).
pub static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("WORD_RUN regex"));

/// Matches tokens ending in a verb/adjective ending.
pub static VERB_ENDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(습니다|합니다|됩니다|입니다|해야|할|한|하는|되는|있는|없는|해|되|있|없|[하되있없]다|[하되있없]는|[하되있없]한|[하되있없]할|[하되있없]해)$",
    )
    .expect("VERB_ENDING regex")
});
