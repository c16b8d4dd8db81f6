//! File export of crawl results.
//!
//! Layout under a base directory:
//!
//! ```text
//! <base>/<yyyymmdd>_<N>/TOP1/blog_<postid>.txt
//!                       TOP1/blog_<postid>_keywords.json
//!                       TOP2/...
//! ```
//!
//! `N` is one more than the highest run number already present for that day.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};
use url::Url;

use crate::error::Result;
use crate::result::{KeywordEntry, PostReport};
use crate::url_utils::{path_segments, post_number};

/// Width of the `=` rule under the text file header.
pub const HEADER_RULE_WIDTH: usize = 80;

/// Paths written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub text: PathBuf,
    pub keywords: Option<PathBuf>,
}

/// Next free run directory name for `date` under `base` (not created).
pub fn next_run_dir(base: &Path, date: NaiveDate) -> Result<PathBuf> {
    let prefix = format!("{}_", date.format("%Y%m%d"));
    let mut highest = 0u32;

    if base.exists() {
        for entry in fs::read_dir(base)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(number) = name
                .to_str()
                .and_then(|n| n.strip_prefix(&prefix))
                .and_then(|n| n.parse::<u32>().ok())
            else {
                continue;
            };
            highest = highest.max(number);
        }
    }

    Ok(base.join(format!("{prefix}{}", highest + 1)))
}

/// Create the run directory for `date` with `TOP1..=TOP<tops>` inside.
pub fn create_run_dir_for(base: &Path, date: NaiveDate, tops: usize) -> Result<PathBuf> {
    let dir = next_run_dir(base, date)?;
    fs::create_dir_all(&dir)?;
    for rank in 1..=tops {
        fs::create_dir_all(top_dir(&dir, rank))?;
    }
    info!(dir = %dir.display(), tops, "run directory created");
    Ok(dir)
}

/// [`create_run_dir_for`] with today's local date.
pub fn create_run_dir(base: &Path, tops: usize) -> Result<PathBuf> {
    create_run_dir_for(base, Local::now().date_naive(), tops)
}

/// `TOP<rank>` directory inside a run directory.
#[must_use]
pub fn top_dir(run_dir: &Path, rank: usize) -> PathBuf {
    run_dir.join(format!("TOP{rank}"))
}

/// `blog_<postid>.txt` for `url`.
///
/// The post id is the numeric post number, else the last path segment,
/// else the current unix timestamp.
#[must_use]
pub fn body_file_name(url: &str) -> String {
    let id = post_number(url)
        .or_else(|| {
            Url::parse(url)
                .ok()
                .and_then(|u| path_segments(&u).last().cloned())
        })
        .unwrap_or_else(|| unix_timestamp().to_string());
    format!("blog_{id}.txt")
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Text file contents: optional `Title:`/`URL:` header, then the body.
#[must_use]
pub fn render_body(url: &str, title: Option<&str>, body: &str) -> String {
    match title {
        Some(title) => format!(
            "Title: {title}\nURL: {url}\n{}\n\n{body}",
            "=".repeat(HEADER_RULE_WIDTH)
        ),
        None => body.to_string(),
    }
}

/// Write `body` into `dir`, creating it if needed.
pub fn write_body(dir: &Path, url: &str, title: Option<&str>, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(body_file_name(url));
    fs::write(&path, render_body(url, title, body))?;
    debug!(path = %path.display(), "body written");
    Ok(path)
}

/// Write keyword rankings as pretty JSON next to `text_path`.
pub fn write_keywords(text_path: &Path, keywords: &[KeywordEntry]) -> Result<PathBuf> {
    let stem = text_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("blog");
    let path = text_path.with_file_name(format!("{stem}_keywords.json"));
    fs::write(&path, serde_json::to_string_pretty(keywords)?)?;
    debug!(path = %path.display(), count = keywords.len(), "keywords written");
    Ok(path)
}

/// Write one report into `TOP<rank>` of `run_dir`.
///
/// Reports without a body write nothing and return `None`; an empty
/// keyword list writes no JSON file.
pub fn export_report(run_dir: &Path, report: &PostReport) -> Result<Option<ExportedFiles>> {
    let Some(body) = report.body.as_deref() else {
        return Ok(None);
    };
    let dir = top_dir(run_dir, report.rank);
    let text = write_body(&dir, &report.url, Some(&report.title), body)?;
    let keywords = if report.keywords.is_empty() {
        None
    } else {
        Some(write_keywords(&text, &report.keywords)?)
    };
    Ok(Some(ExportedFiles { text, keywords }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_prefers_post_number() {
        assert_eq!(body_file_name("https://blog.naver.com/a/223"), "blog_223.txt");
        assert_eq!(
            body_file_name("https://blog.naver.com/PostView.naver?blogId=a&logNo=77"),
            "blog_77.txt"
        );
        assert_eq!(body_file_name("https://blog.naver.com/a/intro"), "blog_intro.txt");
    }

    #[test]
    fn file_name_falls_back_to_timestamp() {
        let name = body_file_name("not a url");
        let id = name.trim_start_matches("blog_").trim_end_matches(".txt");
        assert!(id.parse::<u64>().is_ok());
    }

    #[test]
    fn header_has_rule() {
        let text = render_body("https://blog.naver.com/a/1", Some("제목"), "본문");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.first(), Some(&"Title: 제목"));
        assert_eq!(lines.get(1), Some(&"URL: https://blog.naver.com/a/1"));
        assert_eq!(lines.get(2).map(|l| l.len()), Some(HEADER_RULE_WIDTH));
        assert_eq!(lines.get(4), Some(&"본문"));
    }

    #[test]
    fn no_title_writes_body_only() {
        assert_eq!(render_body("u", None, "본문"), "본문");
    }
}
