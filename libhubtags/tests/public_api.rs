use libhubtags::client::{FetchResponse, tags_url};
use libhubtags::config::{Config, DEFAULT_REGISTRY_URL};
use libhubtags::{
    Enricher, ExclusionSet, HubTagsError, Orchestrator, PageFetcher, Result, build_report,
};
use std::collections::HashMap;

const REGISTRY: &str = "https://hub.example";

struct InMemoryFetcher {
    pages: HashMap<String, String>,
}

impl InMemoryFetcher {
    fn new() -> Self {
        let first = tags_url(REGISTRY, "alpine");
        let second = format!("{}?page=2", first);

        let mut pages = HashMap::new();
        pages.insert(
            first,
            format!(
                r#"{{"count":3,"next":"{}","results":[
                    {{"name":"3.20","full_size":3600000,"last_updated":"2024-06-01T10:00:00Z",
                      "images":[{{"architecture":"amd64","os":"linux","size":3600000}},
                                {{"architecture":"arm","variant":"v7","os":"linux","size":3100000}},
                                {{"architecture":"s390x","os":"linux","size":3300000}}]}},
                    {{"name":"3.19","full_size":3400000,"last_updated":"2024-01-01T10:00:00Z",
                      "images":[{{"architecture":"amd64","os":"linux","size":3400000}}]}}]}}"#,
                second
            ),
        );
        pages.insert(
            second,
            r#"{"count":3,"next":null,"results":[{"name":"edge","full_size":1024}]}"#.to_string(),
        );
        Self { pages }
    }
}

impl PageFetcher for InMemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        Ok(match self.pages.get(url) {
            Some(body) => FetchResponse::new(200, body.clone()),
            None => FetchResponse::new(404, r#"{"message":"object not found"}"#),
        })
    }
}

fn default_enricher() -> Enricher {
    let config = Config::default();
    Enricher::new(
        config
            .output
            .exclude_architectures
            .iter()
            .cloned()
            .collect::<ExclusionSet>(),
    )
}

#[test]
fn test_version() {
    assert!(!libhubtags::version().is_empty());
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.registry.url, DEFAULT_REGISTRY_URL);
    assert_eq!(config.output.report, "brief");
}

#[tokio::test]
async fn test_brief_report_end_to_end() {
    let mut runner = Orchestrator::new(InMemoryFetcher::new(), REGISTRY)
        .with_enricher(default_enricher());
    let mut report = build_report("brief").unwrap();
    let mut out = Vec::new();

    let summary = runner
        .run(&["alpine".to_string()], report.as_mut(), &mut out)
        .await
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.rows, 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "alpine:3.20  3.43MB  [amd64:l, arm/v7:l]\n\
         alpine:3.19  3.24MB  [amd64:l]\n\
         alpine:edge  1.00KB  [x86_64]\n"
    );
}

#[tokio::test]
async fn test_aggregate_report_with_failed_repository() {
    let mut runner = Orchestrator::new(InMemoryFetcher::new(), REGISTRY);
    let mut report = build_report("json").unwrap();
    let mut out = Vec::new();

    let summary = runner
        .run(
            &["nope".to_string(), "alpine".to_string()],
            report.as_mut(),
            &mut out,
        )
        .await
        .unwrap();

    assert_eq!(summary.failures, 1);
    let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["count"], 3);
    assert_eq!(doc["results"].as_array().unwrap().len(), 3);
    assert_eq!(doc["results"][2]["name"], "edge");
}

#[tokio::test]
async fn test_template_report_end_to_end() {
    let mut runner = Orchestrator::new(InMemoryFetcher::new(), REGISTRY);
    let mut report = build_report("P:{repo}#{page} {rows}/{count}").unwrap();
    let mut out = Vec::new();

    runner
        .run(&["alpine".to_string()], report.as_mut(), &mut out)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "alpine#0 2/3\nalpine#1 1/3\n");
}

#[test]
fn test_bad_selector() {
    assert!(matches!(
        build_report("Q:{name}"),
        Err(HubTagsError::BadTemplate { .. })
    ));
}
