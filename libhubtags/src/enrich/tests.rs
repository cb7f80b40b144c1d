use super::*;
use crate::model::ImageVariant;

fn variant(arch: &str, variant: Option<&str>, size: u64) -> ImageVariant {
    ImageVariant {
        architecture: arch.to_string(),
        variant: variant.map(str::to_string),
        size: Some(size),
        ..ImageVariant::default()
    }
}

fn labels(row: &ResultRow) -> Vec<&str> {
    row.architectures.iter().map(|a| a.label.as_str()).collect()
}

#[test]
fn test_duplicate_and_excluded_labels() {
    let enricher = Enricher::new(ExclusionSet::from_iter(["arm/v7"]));
    let row = ResultRow::new("1.0", Some(10)).with_images(vec![
        variant("amd64", None, 1),
        variant("amd64", None, 2),
        variant("arm", Some("v7"), 3),
    ]);

    let row = enricher.enrich(row);
    assert_eq!(labels(&row), vec!["amd64"]);
}

#[test]
fn test_first_occurrence_wins() {
    let enricher = Enricher::default();
    let row = ResultRow::new("1.0", Some(10)).with_images(vec![
        variant("amd64", None, 111),
        variant("arm64", Some("v8"), 222),
        variant("amd64", None, 999),
    ]);

    let row = enricher.enrich(row);
    assert_eq!(row.architectures.len(), 2);
    assert_eq!(row.architectures[0], Architecture::new("amd64", Some(111)));
    assert_eq!(row.architectures[1], Architecture::new("arm64/v8", Some(222)));
}

#[test]
fn test_missing_images_fall_back_to_x86_64() {
    let row = Enricher::default().enrich(ResultRow::new("old", Some(4096)));

    assert_eq!(
        row.architectures,
        vec![Architecture::new(FALLBACK_ARCHITECTURE, Some(4096))]
    );
}

#[test]
fn test_empty_images_fall_back_to_x86_64() {
    let row = Enricher::default().enrich(ResultRow::new("old", Some(7)).with_images(vec![]));
    assert_eq!(labels(&row), vec!["x86_64"]);
}

#[test]
fn test_fallback_can_be_excluded() {
    let enricher = Enricher::new(ExclusionSet::from_iter(["x86_64"]));
    let row = enricher.enrich(ResultRow::new("old", Some(7)));
    assert!(row.architectures.is_empty());
}

#[test]
fn test_size_display() {
    let enricher = Enricher::default();
    assert_eq!(enricher.enrich(ResultRow::new("a", Some(100))).size_display, "100B");
    assert_eq!(enricher.enrich(ResultRow::new("b", Some(0))).size_display, "?");
    assert_eq!(enricher.enrich(ResultRow::new("c", None)).size_display, "?");
}

#[test]
fn test_identity_fields_unchanged() {
    let original = ResultRow::new("2.0", Some(55))
        .with_last_updated("2024-01-01T00:00:00Z")
        .with_images(vec![variant("amd64", None, 55)]);

    let enriched = Enricher::default().enrich(original.clone());
    assert_eq!(enriched.name, original.name);
    assert_eq!(enriched.full_size, original.full_size);
    assert_eq!(enriched.last_updated, original.last_updated);
    assert_eq!(enriched.images, original.images);
}

#[test]
fn test_default_config_exclusions_hide_exotic_platforms() {
    let excluded: ExclusionSet = crate::config::DEFAULT_EXCLUDED_ARCHITECTURES
        .iter()
        .copied()
        .collect();
    let enricher = Enricher::new(excluded);

    let linux = |arch: &str| ImageVariant {
        architecture: arch.to_string(),
        os: Some("linux".to_string()),
        size: Some(1),
        ..ImageVariant::default()
    };
    let row = ResultRow::new("latest", Some(1)).with_images(vec![
        linux("amd64"),
        linux("s390x"),
        linux("ppc64le"),
        linux("arm64"),
    ]);

    let row = enricher.enrich(row);
    assert_eq!(labels(&row), vec!["amd64:l", "arm64:l"]);
}

#[test]
fn test_exclusion_set_basics() {
    let set = ExclusionSet::from_iter(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
    assert_eq!(set.len(), 2);
    assert!(set.contains("a"));
    assert!(!set.contains("c"));
    assert!(ExclusionSet::empty().is_empty());
}
