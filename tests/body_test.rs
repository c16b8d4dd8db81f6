//! Body assembly and marker extraction through the public API.

#![allow(clippy::expect_used)]

use std::collections::HashSet;

use rs_blogscrape::body::{count_main_containers, count_post_view_containers, normalize_lines};
use rs_blogscrape::markers::try_extract_with_markers;
use rs_blogscrape::{dom, extract_body, extract_body_bytes, extract_with_markers, FetchedPage, Options, PageSource};

const RICH_POST: &str = r##"<html><body>
<div class="se-main-container">
  <div class="se-module se-module-text"><p>여행 첫째 날 기록입니다.</p></div>
  <div class="se-module se-module-image"><a href="https://example.com/big.jpg"><img src="1.jpg"></a></div>
  <div class="se-module se-module-text"><p>여행 첫째 날 기록입니다.</p><p>  여행   첫째 날 기록입니다. </p></div>
  <div class="se-module se-module-sticker"><img src="s.png"><a href="#"></a></div>
  <div class="se-module se-module-oglink"><a href="https://example.com"><img src="og.png"><span>미리보기</span></a></div>
  <p>숙소는 <a href="https://example.com/hotel">여기</a>에서 예약했습니다.</p>
  <div class="se-module se-module-image"><img src="2.jpg"></div>
</div>
</body></html>"##;

fn page(html: &str) -> FetchedPage {
    FetchedPage {
        html: html.to_string(),
        final_url: "https://blog.naver.com/a/1".to_string(),
        source: PageSource::Primary,
    }
}

#[test]
fn scenario_image_then_link() {
    let doc = dom::parse(r#"<div id="c"><img/><a href="x">hello</a></div>"#);
    let text = extract_with_markers(&doc.select("#c"), &Options::default());
    assert_eq!(text, "[Image 1]\nhello\n[Link 1]");
}

#[test]
fn scenario_sticker_module_with_empty_link() {
    let doc = dom::parse(r##"<div class="se-module-sticker"><img src="s.png"><a href="#"></a></div>"##);
    let text = extract_with_markers(&doc.select("div"), &Options::default());
    assert_eq!(text, "[Sticker 1]");
}

#[test]
fn markers_follow_document_order() {
    let doc = dom::parse(RICH_POST);
    let marked = try_extract_with_markers(&doc.select(".se-main-container"), &Options::default())
        .expect("walk");

    let markers: Vec<&str> = marked
        .text
        .lines()
        .filter(|l| l.starts_with('['))
        .collect();
    assert_eq!(
        markers,
        vec!["[Image 1]", "[Sticker 1]", "[Link 1]", "[Link 2]", "[Image 2]"]
    );
    assert_eq!(marked.counts.image, 2);
    assert_eq!(marked.counts.sticker, 1);
    assert_eq!(marked.counts.link, 2);
}

#[test]
fn assembled_body_has_no_duplicate_text_lines() {
    let body = extract_body(RICH_POST).expect("body");

    let mut seen = HashSet::new();
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }
        let folded = line.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        assert!(seen.insert(folded), "duplicate line {line:?} in {body:?}");
    }
    assert_eq!(body.matches("여행 첫째 날 기록입니다.").count(), 1);
}

#[test]
fn assembly_is_idempotent() {
    let page = page(RICH_POST);
    let options = Options::default();

    let first = rs_blogscrape::assemble_body(&page, &options);
    let second = rs_blogscrape::assemble_body(&page, &options);

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn normalize_is_stable_on_its_output() {
    let raw = "A\nA\n\n\n\n[Image 1]\n[Image 1]\n  b  \nB\n";
    let once = normalize_lines(raw);
    assert_eq!(once, "A\n\n[Image 1]\n[Image 1]\nb");
    assert_eq!(normalize_lines(&once), once);
}

#[test]
fn loose_container_needs_enough_text() {
    let short = r#"<html><body><div class="content">짧은 글</div></body></html>"#;
    let long = r#"<html><body><div class="post-area">이 본문은 느슨한 컨테이너 규칙이 받아들일 만큼 충분히 깁니다.</div></body></html>"#;

    assert_eq!(extract_body(short), None);
    assert_eq!(
        extract_body(long).as_deref(),
        Some("이 본문은 느슨한 컨테이너 규칙이 받아들일 만큼 충분히 깁니다.")
    );
}

#[test]
fn whole_page_fallback_drops_chrome_and_short_lines() {
    let html = r#"<html><body>
        <nav>메뉴 항목이 여러 개 있습니다</nav>
        <section><p>컨테이너 없이 쓰인 본문 문장입니다.</p><p>짧음</p></section>
        <footer>저작권 표시 문구입니다</footer>
    </body></html>"#;

    assert_eq!(extract_body(html).as_deref(), Some("컨테이너 없이 쓰인 본문 문장입니다."));
}

#[test]
fn empty_page_has_no_body() {
    assert_eq!(extract_body("<html><body><nav>메뉴 메뉴 메뉴</nav></body></html>"), None);
}

#[test]
fn legacy_euc_kr_page_is_decoded() {
    let (bytes, _, _) = encoding_rs::EUC_KR.encode(r#"<div id="post-view1"><p>옛날 블로그 본문</p></div>"#);
    let body = extract_body_bytes(&bytes, Some("text/html; charset=euc-kr"));
    assert_eq!(body.as_deref(), Some("옛날 블로그 본문"));
}

#[test]
fn container_diagnostics() {
    let doc = dom::parse(
        r#"<div class="se-main-container"></div><div class="se-main-container"></div>
           <div id="Post-View223"></div>"#,
    );
    assert_eq!(count_main_containers(&doc), 2);
    assert_eq!(count_post_view_containers(&doc, "223"), 1);
    assert_eq!(count_post_view_containers(&doc, "999"), 0);
}
