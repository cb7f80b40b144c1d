use super::*;
use crate::test_support::{ScriptedFetcher, page_body, page_url, start_url};

fn three_page_chain() -> ScriptedFetcher {
    ScriptedFetcher::new()
        .page(
            &page_url("alpine", 1),
            page_body(5, Some(&page_url("alpine", 2)), &[("3.19", 100), ("3.18", 200)]),
        )
        .page(
            &page_url("alpine", 2),
            page_body(5, Some(&page_url("alpine", 3)), &[("3.17", 300), ("3.16", 400)]),
        )
        .page(&page_url("alpine", 3), page_body(5, None, &[("3.15", 500)]))
}

#[tokio::test]
async fn test_follows_chain_in_order() {
    let fetcher = three_page_chain();
    let mut pages = Paginator::new(&fetcher, start_url("alpine"));

    let mut names = Vec::new();
    let mut count = 0;
    while let Some(page) = pages.next_page().await {
        let page = page.unwrap();
        count += 1;
        names.extend(page.results.into_iter().map(|r| r.name));
    }

    assert_eq!(count, 3);
    assert_eq!(names, vec!["3.19", "3.18", "3.17", "3.16", "3.15"]);
    assert_eq!(pages.pages_fetched(), 3);
    assert_eq!(
        fetcher.requests(),
        vec![
            page_url("alpine", 1),
            page_url("alpine", 2),
            page_url("alpine", 3)
        ]
    );
}

#[tokio::test]
async fn test_exhausted_cursor_does_not_fetch_again() {
    let fetcher = ScriptedFetcher::new().page(&start_url("busybox"), page_body(1, None, &[("1.36", 10)]));
    let mut pages = Paginator::new(&fetcher, start_url("busybox"));

    assert!(pages.next_page().await.unwrap().is_ok());
    assert!(pages.next_page().await.is_none());
    assert!(pages.next_page().await.is_none());
    assert_eq!(fetcher.requests().len(), 1);
    assert!(pages.next_url().is_none());
}

#[tokio::test]
async fn test_is_lazy() {
    let fetcher = three_page_chain();
    let mut pages = pages(&fetcher, start_url("alpine"));

    assert!(fetcher.requests().is_empty());
    pages.next_page().await.unwrap().unwrap();
    assert_eq!(fetcher.requests().len(), 1);
    assert_eq!(pages.next_url(), Some(page_url("alpine", 2).as_str()));
}

#[tokio::test]
async fn test_error_status_stops_after_previous_pages() {
    let fetcher = ScriptedFetcher::new()
        .page(
            &page_url("nginx", 1),
            page_body(9, Some(&page_url("nginx", 2)), &[("1.25", 1)]),
        )
        .page(
            &page_url("nginx", 2),
            page_body(9, Some(&page_url("nginx", 3)), &[("1.24", 1)]),
        )
        .status(&page_url("nginx", 3), 503, "upstream unavailable")
        .page(&page_url("nginx", 4), page_body(9, None, &[("1.22", 1)]));

    let mut pages = Paginator::new(&fetcher, start_url("nginx"));
    assert!(pages.next_page().await.unwrap().is_ok());
    assert!(pages.next_page().await.unwrap().is_ok());

    match pages.next_page().await {
        Some(Err(HubTagsError::FetchFailed { status, body, url })) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
            assert_eq!(url, page_url("nginx", 3));
        }
        other => panic!("Expected FetchFailed, got {:?}", other.map(|r| r.is_ok())),
    }

    assert!(pages.next_page().await.is_none());
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn test_error_on_first_page() {
    let fetcher = ScriptedFetcher::new().status(&start_url("missing"), 404, "{\"message\":\"not found\"}");
    let mut pages = Paginator::new(&fetcher, start_url("missing"));

    let result = pages.next_page().await.unwrap();
    assert!(matches!(result, Err(HubTagsError::FetchFailed { status: 404, .. })));
    assert_eq!(pages.pages_fetched(), 0);
}

#[tokio::test]
async fn test_malformed_body_ends_chain() {
    let fetcher = ScriptedFetcher::new().page(&start_url("weird"), "<html></html>".to_string());
    let mut pages = Paginator::new(&fetcher, start_url("weird"));

    let result = pages.next_page().await.unwrap();
    assert!(matches!(result, Err(HubTagsError::MalformedPage { .. })));
    assert!(pages.next_page().await.is_none());
}

#[tokio::test]
async fn test_transport_error_ends_chain() {
    let fetcher = ScriptedFetcher::new();
    let mut pages = Paginator::new(&fetcher, start_url("offline"));

    let result = pages.next_page().await.unwrap();
    assert!(matches!(result, Err(HubTagsError::Network { .. })));
    assert!(pages.next_page().await.is_none());
}

#[tokio::test]
async fn test_self_referencing_next_link_is_rejected_after_page() {
    let url = start_url("loop");
    let fetcher = ScriptedFetcher::new().page(&url, page_body(1, Some(&url), &[("v1", 1)]));
    let mut pages = Paginator::new(&fetcher, url.clone());

    let page = pages.next_page().await.unwrap().unwrap();
    assert_eq!(page.results[0].name, "v1");

    let result = pages.next_page().await.unwrap();
    assert!(matches!(result, Err(HubTagsError::MalformedPage { .. })));
    assert!(pages.next_page().await.is_none());
    assert_eq!(fetcher.requests().len(), 1);
}

#[tokio::test]
async fn test_relative_next_link_is_resolved() {
    let fetcher = ScriptedFetcher::new()
        .page(
            &page_url("redis", 1),
            page_body(2, Some("?page=2"), &[("7.2", 1)]),
        )
        .page(&page_url("redis", 2), page_body(2, None, &[("7.0", 1)]));

    let mut pages = Paginator::new(&fetcher, start_url("redis"));
    let mut total = 0;
    while let Some(page) = pages.next_page().await {
        total += page.unwrap().results.len();
    }

    assert_eq!(total, 2);
    assert_eq!(fetcher.requests()[1], page_url("redis", 2));
}
