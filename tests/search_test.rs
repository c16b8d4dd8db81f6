//! Search results parsing over a scripted transport.

#![allow(clippy::expect_used)]

mod common;

use common::{result_item, FakeTransport};
use rs_blogscrape::search::search_url;
use rs_blogscrape::{search, Options};

const KEYWORD: &str = "홈페이지 제작";

fn endpoint(options: &Options) -> String {
    search_url(KEYWORD, options).expect("search url").to_string()
}

fn results_page(items: &[String]) -> String {
    format!("<html><body><ul>{}</ul></body></html>", items.concat())
}

#[tokio::test]
async fn advertisement_blocks_are_excluded() {
    let options = Options::fast();
    let page = results_page(&[
        result_item("bx", "https://blog.naver.com/a/1", "첫 번째 후기"),
        result_item("ad_bx", "https://blog.naver.com/ad/2", "광고 글 하나"),
        result_item("bx", "https://blog.naver.com/b/3", "두 번째 후기"),
        result_item("ad_bx", "https://blog.naver.com/ad/4", "광고 글 둘"),
        result_item("bx", "https://blog.naver.com/c/5", "세 번째 후기"),
    ]);
    let fake = FakeTransport::new().page(&endpoint(&options), &page);

    let results = search(&fake, KEYWORD, 5, &options).await;

    assert!(results.len() <= 3);
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://blog.naver.com/a/1",
            "https://blog.naver.com/b/3",
            "https://blog.naver.com/c/5"
        ]
    );
    assert!(results.iter().all(|r| !r.title.contains("광고")));
}

#[tokio::test]
async fn stops_at_requested_count() {
    let options = Options::fast();
    let page = results_page(&[
        result_item("bx", "https://blog.naver.com/a/1", "첫 번째 후기"),
        result_item("bx", "https://blog.naver.com/b/2", "두 번째 후기"),
        result_item("bx", "https://blog.naver.com/c/3", "세 번째 후기"),
    ]);
    let fake = FakeTransport::new().page(&endpoint(&options), &page);

    let results = search(&fake, KEYWORD, 2, &options).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results.first().map(|r| r.title.as_str()), Some("첫 번째 후기"));
}

#[tokio::test]
async fn urls_are_absolute_on_the_blog_host() {
    let options = Options::fast();
    let page = results_page(&[
        result_item("bx", "//blog.naver.com/a/1", "프로토콜 상대 링크"),
        result_item("bx", "/PostView.naver?blogId=b&amp;logNo=2&amp;src=blog.naver.com", "상대 경로 링크"),
    ]);
    let fake = FakeTransport::new().page(&endpoint(&options), &page);

    let results = search(&fake, KEYWORD, 5, &options).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.url.starts_with("https://blog.naver.com/")));
}

#[tokio::test]
async fn missing_title_is_fetched_from_the_post() {
    let options = Options::fast();
    let page = r#"<html><body><p><a href="https://blog.naver.com/a/1"><img src="thumb.png"></a></p></body></html>"#;
    let post = r#"<html><body>
        <span class="se-fs-fs32 se-ff-nanummaruburi">본문에서 찾은 제목</span>
        <div class="se-main-container"><p>본문</p></div>
    </body></html>"#;
    let fake = FakeTransport::new()
        .page(&endpoint(&options), page)
        .page("https://blog.naver.com/a/1", post);

    let results = search(&fake, KEYWORD, 3, &options).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results.first().map(|r| r.title.as_str()), Some("본문에서 찾은 제목"));
}

#[tokio::test]
async fn unresolvable_titles_skip_the_link() {
    let options = Options::fast();
    let page = format!(
        r#"<html><body><p><a href="https://blog.naver.com/a/1"><img src="t.png"></a></p><ul>{}</ul></body></html>"#,
        result_item("bx", "https://blog.naver.com/b/2", "제목 있는 글")
    );
    let fake = FakeTransport::new()
        .page(&endpoint(&options), &page)
        .status("https://blog.naver.com/a/1", 404);

    let results = search(&fake, KEYWORD, 3, &options).await;

    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["https://blog.naver.com/b/2"]);
}

#[tokio::test]
async fn long_titles_are_truncated() {
    let options = Options::fast();
    let long = "가".repeat(200);
    let page = results_page(&[result_item("bx", "https://blog.naver.com/a/1", &long)]);
    let fake = FakeTransport::new().page(&endpoint(&options), &page);

    let results = search(&fake, KEYWORD, 1, &options).await;

    assert_eq!(results.first().map(|r| r.title.chars().count()), Some(150));
}

#[tokio::test]
async fn truncated_titles_are_trimmed() {
    let options = Options::fast();
    let title = format!("{} tail", "가".repeat(149));
    let page = results_page(&[result_item("bx", "https://blog.naver.com/a/1", &title)]);
    let fake = FakeTransport::new().page(&endpoint(&options), &page);

    let results = search(&fake, KEYWORD, 1, &options).await;

    let first = results.first().expect("result");
    assert_eq!(first.title, "가".repeat(149));
}

#[tokio::test]
async fn request_failure_gives_empty_list() {
    let options = Options::fast();
    let fake = FakeTransport::new().status(&endpoint(&options), 503);

    assert!(search(&fake, KEYWORD, 3, &options).await.is_empty());
}

#[tokio::test]
async fn page_without_blog_links_gives_empty_list() {
    let options = Options::fast();
    let fake = FakeTransport::new().page(
        &endpoint(&options),
        r#"<html><body><a href="https://cafe.naver.com/x/1">카페 글</a></body></html>"#,
    );

    assert!(search(&fake, KEYWORD, 3, &options).await.is_empty());
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn zero_results_requested_makes_no_request() {
    let options = Options::fast();
    let fake = FakeTransport::new();

    assert!(search(&fake, KEYWORD, 0, &options).await.is_empty());
    assert!(fake.requests().is_empty());
}
