//! Keyword frequency ranking.
//!
//! Pipeline: strip markup, URLs, e-mails, and media markers, split into
//! word runs with a [`Tokenizer`], strip trailing particles, drop short,
//! numeric, stopword, and predicate-ending tokens, then count and rank.
//! The tokenizer is swappable; the filtering pipeline is shared.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use crate::options::Options;
use crate::patterns::{
    EMAIL_TEXT, MARKER_TEXT, MARKUP_TAG, NON_WORD, URL_TEXT, VERB_ENDING, WHITESPACE_NORMALIZE,
    WORD_RUN,
};
use crate::result::{KeywordEntry, KeywordStat};

/// Trailing particles, stripped in this order, each at most once.
pub const PARTICLES: &[&str] = &[
    "이", "가", "은", "는", "을", "를", "에", "에서", "에게", "께", "한테", "의", "도", "만",
    "까지", "부터", "보다", "처럼", "같이", "로", "으로", "하고",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // particles on their own
        "이", "가", "을", "를", "에", "의", "와", "과", "은", "는", "도", "로", "으로", "에서",
        "에게", "께", "한테", "처럼", "만", "까지", "부터", "보다", "같이", "하고", "만큼",
        "대로", "마저", "조차",
        // pronouns and demonstratives
        "그", "이것", "저것", "그것", "이런", "저런", "그런", "저", "어떤", "무엇", "누구",
        "어디",
        // filler nouns
        "것", "수", "때", "등", "및", "또", "또한", "그리고", "경우", "때문", "위해", "통해",
        "대해", "관련",
        // conjunctions and adverbs
        "하지만", "그러나", "따라서", "그래서", "그런데", "그래도", "그러면", "그렇다면",
        "그러므로",
        // bare predicate stems
        "있", "없", "되", "하", "있다", "없다", "된다", "하다", "이다", "아니다",
    ]
    .into_iter()
    .collect()
});

/// Splits preprocessed text into candidate tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word-run tokenizer (Unicode `\w+`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_RUN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Remove markup, URLs, e-mails, and markers; keep only word characters.
#[must_use]
pub fn preprocess(text: &str) -> String {
    let text = MARKUP_TAG.replace_all(text, "");
    let text = URL_TEXT.replace_all(&text, "");
    let text = EMAIL_TEXT.replace_all(&text, "");
    let text = MARKER_TEXT.replace_all(&text, "");
    let text = NON_WORD.replace_all(&text, " ");
    WHITESPACE_NORMALIZE.replace_all(&text, " ").trim().to_string()
}

/// Strip trailing particles; a token that would become empty is kept as is.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::keywords::strip_particles;
///
/// assert_eq!(strip_particles("학교에서"), "학교");
/// assert_eq!(strip_particles("이"), "이");
/// ```
#[must_use]
pub fn strip_particles(word: &str) -> String {
    let mut stripped = word;
    for particle in PARTICLES {
        if let Some(rest) = stripped.strip_suffix(particle) {
            stripped = rest;
        }
    }
    let stripped = stripped.trim();
    if stripped.is_empty() {
        word.to_string()
    } else {
        stripped.to_string()
    }
}

/// Whether `word` is in the stopword set.
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Counts and ranks keywords.
#[derive(Debug, Clone)]
pub struct KeywordRanker<T: Tokenizer = SimpleTokenizer> {
    tokenizer: T,
    min_length: usize,
    min_count: usize,
}

impl Default for KeywordRanker<SimpleTokenizer> {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

impl KeywordRanker<SimpleTokenizer> {
    #[must_use]
    pub const fn new(min_length: usize, min_count: usize) -> Self {
        Self {
            tokenizer: SimpleTokenizer,
            min_length,
            min_count,
        }
    }

    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.keyword_min_length, options.keyword_min_count)
    }
}

impl<T: Tokenizer> KeywordRanker<T> {
    /// Ranker using a different tokenizer with the same filters.
    pub fn with_tokenizer<U: Tokenizer>(self, tokenizer: U) -> KeywordRanker<U> {
        KeywordRanker {
            tokenizer,
            min_length: self.min_length,
            min_count: self.min_count,
        }
    }

    /// Filtered tokens of `text`, in encounter order.
    #[must_use]
    pub fn keywords(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(&preprocess(text))
            .iter()
            .map(|token| strip_particles(token))
            .filter(|word| self.keep(word))
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        word.chars().count() >= self.min_length
            && !is_stopword(word)
            && !word.chars().all(char::is_numeric)
            && !VERB_ENDING.is_match(word)
    }

    /// All keywords occurring at least `min_count` times, most frequent first.
    ///
    /// Equal counts keep the order in which the words first appeared.
    #[must_use]
    pub fn rank(&self, text: &str) -> Vec<KeywordEntry> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut order: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for word in self.keywords(text) {
            if let Some(&i) = index.get(&word) {
                if let Some(entry) = order.get_mut(i) {
                    entry.1 += 1;
                }
            } else {
                index.insert(word.clone(), order.len());
                order.push((word, 1));
            }
        }

        order.retain(|(_, count)| *count >= self.min_count);
        order.sort_by(|a, b| b.1.cmp(&a.1));

        order
            .into_iter()
            .enumerate()
            .map(|(i, (keyword, count))| KeywordEntry {
                keyword,
                count,
                rank: i + 1,
            })
            .collect()
    }

    /// [`Self::rank`] limited to the first `top_n` entries (`0` keeps all).
    #[must_use]
    pub fn rank_top(&self, text: &str, top_n: usize) -> Vec<KeywordEntry> {
        let mut ranked = self.rank(text);
        if top_n > 0 {
            ranked.truncate(top_n);
        }
        ranked
    }

    /// Keyword → count and rank.
    #[must_use]
    pub fn ranking_map(&self, text: &str, top_n: usize) -> BTreeMap<String, KeywordStat> {
        self.rank_top(text, top_n)
            .into_iter()
            .map(|e| {
                (
                    e.keyword,
                    KeywordStat {
                        count: e.count,
                        rank: e.rank,
                    },
                )
            })
            .collect()
    }
}

/// Rank `text` with the simple tokenizer.
#[must_use]
pub fn rank(text: &str, min_length: usize, min_count: usize) -> Vec<KeywordEntry> {
    KeywordRanker::new(min_length, min_count).rank(text)
}
