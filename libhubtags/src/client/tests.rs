use super::*;

#[test]
fn test_client_config_default() {
    let config = ClientConfig::new();
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.max_idle_per_host, 10);
}

#[test]
fn test_client_config_builders() {
    let config = ClientConfig::new()
        .with_timeout(60)
        .with_max_idle_per_host(20);
    assert_eq!(config.timeout_seconds, 60);
    assert_eq!(config.max_idle_per_host, 20);
}

#[test]
fn test_fetch_response_success_range() {
    assert!(FetchResponse::new(200, "").is_success());
    assert!(FetchResponse::new(204, "").is_success());
    assert!(FetchResponse::new(299, "").is_success());
    assert!(!FetchResponse::new(199, "").is_success());
    assert!(!FetchResponse::new(301, "").is_success());
    assert!(!FetchResponse::new(404, "").is_success());
    assert!(!FetchResponse::new(500, "").is_success());
}

#[test]
fn test_fetch_response_body_text_is_lossy() {
    let response = FetchResponse::new(500, vec![b'o', b'k', 0xff]);
    assert!(response.body_text().starts_with("ok"));
}

#[test]
fn test_tags_url_short_name_uses_library() {
    assert_eq!(
        tags_url("https://registry.hub.docker.com", "alpine"),
        "https://registry.hub.docker.com/v2/repositories/library/alpine/tags/"
    );
}

#[test]
fn test_tags_url_namespaced_name_verbatim() {
    assert_eq!(
        tags_url("https://registry.hub.docker.com", "bitnami/redis"),
        "https://registry.hub.docker.com/v2/repositories/bitnami/redis/tags/"
    );
}

#[test]
fn test_normalize_adds_scheme() {
    assert_eq!(
        normalize_registry_url("registry.example.com").unwrap(),
        "https://registry.example.com"
    );
}

#[test]
fn test_normalize_keeps_http_scheme() {
    assert_eq!(
        normalize_registry_url("http://localhost:5000").unwrap(),
        "http://localhost:5000"
    );
}

#[test]
fn test_normalize_removes_trailing_slashes() {
    assert_eq!(
        normalize_registry_url("http://localhost:5000///").unwrap(),
        "http://localhost:5000"
    );
}

#[test]
fn test_normalize_rejects_empty() {
    assert!(matches!(
        normalize_registry_url("   "),
        Err(HubTagsError::Config { .. })
    ));
}

#[test]
fn test_resolve_next_absolute() {
    let next = resolve_next(
        "https://hub/v2/repositories/library/alpine/tags/",
        "https://other/v2/repositories/library/alpine/tags/?page=2",
    )
    .unwrap();
    assert_eq!(
        next,
        "https://other/v2/repositories/library/alpine/tags/?page=2"
    );
}

#[test]
fn test_resolve_next_relative() {
    let next = resolve_next(
        "https://hub/v2/repositories/library/alpine/tags/",
        "/v2/repositories/library/alpine/tags/?page=2",
    )
    .unwrap();
    assert_eq!(next, "https://hub/v2/repositories/library/alpine/tags/?page=2");
}

#[test]
fn test_resolve_next_invalid_base() {
    let result = resolve_next("not a url", "?page=2");
    assert!(matches!(result, Err(HubTagsError::MalformedPage { .. })));
}

#[tokio::test]
async fn test_http_fetcher_returns_body_and_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/repositories/library/alpine/tags/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"count":0,"next":null,"results":[]}"#)
        .create_async()
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let url = tags_url(&server.url(), "alpine");
    let response = fetcher.fetch(&url).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body_text(), r#"{"count":0,"next":null,"results":[]}"#);
}

#[tokio::test]
async fn test_http_fetcher_passes_error_status_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/repositories/library/nope/tags/")
        .with_status(404)
        .with_body(r#"{"message":"object not found"}"#)
        .create_async()
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let response = fetcher.fetch(&tags_url(&server.url(), "nope")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert!(response.body_text().contains("object not found"));
}

#[tokio::test]
async fn test_http_fetcher_connection_refused_is_network_error() {
    let fetcher = HttpFetcher::with_config(ClientConfig::new().with_timeout(2)).unwrap();
    // Port 9 (discard) is almost never listening locally
    let result = fetcher.fetch("http://127.0.0.1:9/v2/").await;

    assert!(matches!(result, Err(HubTagsError::Network { .. })));
}
