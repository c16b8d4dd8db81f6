//! Block-page detection.
//!
//! A fetched page is "blocked" when it carries one of a fixed set of
//! anti-scraping or policy notices. Matching is plain case-insensitive
//! substring containment; the list favors precision over recall.

/// Known block-page phrases and redirect-script signatures.
pub const BLOCK_SIGNATURES: &[&str] = &[
    "해당 블로그는 운영정책 위반으로 접근이 제한되었습니다",
    "access to this blog has been blocked",
    "captcha-invitation",
    "blog.naver.com/section/notice",
    "본 인증을 완료해 주세요",
    "보안 인증을 위해",
    "location.replace(\"/blocked\"",
    "location.href = \"/blocked\"",
    "window.location.replace(\"/blocked\"",
    "securitynotice",
];

/// Whether `html` looks like a block page.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::block::is_blocked;
///
/// assert!(is_blocked("<div class=\"captcha-invitation\">...</div>"));
/// assert!(!is_blocked("<div class=\"se-main-container\">hello</div>"));
/// ```
#[must_use]
pub fn is_blocked(html: &str) -> bool {
    let lowered = html.to_lowercase();
    BLOCK_SIGNATURES
        .iter()
        .any(|signature| lowered.contains(&signature.to_lowercase()))
}

/// The first signature found in `html`, for logging.
#[must_use]
pub fn matched_signature(html: &str) -> Option<&'static str> {
    let lowered = html.to_lowercase();
    BLOCK_SIGNATURES
        .iter()
        .copied()
        .find(|signature| lowered.contains(&signature.to_lowercase()))
}
