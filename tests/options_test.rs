use rs_blogscrape::{extract_body, extract_body_with_options, Error, Options};

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();
    assert_eq!(options.blog_host, "blog.naver.com");
    assert_eq!(options.title_max_chars, 150);
    assert_eq!(options.title_min_exclusive, 2);
    assert_eq!(options.keyword_min_length, 2);
    assert_eq!(options.keyword_min_count, 2);
    assert_eq!(options.keyword_top_n, 20);
    assert!(options.primary_delay_ms[0] <= options.primary_delay_ms[1]);
    assert!(options.validate().is_ok());
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        max_workers: 8,
        ..Options::fast()
    };

    assert_eq!(options.max_workers, 8);
    assert_eq!(options.primary_delay_ms, [0, 0]);
    assert_eq!(options.mobile_host, "m.blog.naver.com");
}

#[test]
fn extract_body_with_options_respects_thresholds() {
    let html = r#"<html><body><div class="content">열두 글자 정도의 본문입니다</div></body></html>"#;

    assert!(extract_body(html).is_some());

    let strict = Options {
        loose_container_threshold: 100,
        fallback_line_threshold: 100,
        ..Options::default()
    };
    assert_eq!(extract_body_with_options(html, &strict), None);
}

#[test]
fn options_load_from_toml_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("blogscrape.toml");
    std::fs::write(
        &path,
        r#"
        timeout_secs = 30
        max_workers = 2
        user_agents = ["test-agent/1.0"]

        [search_params]
        where = "blog"
        "#,
    )
    .unwrap_or_else(|e| panic!("write: {e}"));

    let options = Options::from_file(&path).unwrap_or_else(|e| panic!("load: {e}"));
    assert_eq!(options.timeout_secs, 30);
    assert_eq!(options.max_workers, 2);
    assert_eq!(options.user_agents, vec!["test-agent/1.0".to_string()]);
    assert_eq!(options.search_params.get("where").map(String::as_str), Some("blog"));
    assert_eq!(options.search_params.len(), 1);
}

#[test]
fn missing_file_is_config_error() {
    let err = Options::from_file("/definitely/not/here.toml");
    assert!(matches!(err, Err(Error::Config(_))));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = Options::from_toml_str("timeout_secs = 0");
    assert!(matches!(err, Err(Error::Config(_))));
}
