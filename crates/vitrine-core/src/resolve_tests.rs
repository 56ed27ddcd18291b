//! Tests for `resolve` module

use super::catalog::{Catalog, ProductRecord};
use super::resolve::{NameResolver, Resolution};

fn resolver() -> NameResolver {
    let catalog = Catalog::from_records(vec![
        ProductRecord::named("Nike Air Shoe"),
        ProductRecord::named("Adidas Runner"),
        ProductRecord::named("nike air shoe  "),
        ProductRecord::named("Puma Cap"),
    ])
    .unwrap();
    NameResolver::new(&catalog)
}

#[test]
fn test_exact_match_ignores_case_and_padding() {
    let names = resolver();
    assert_eq!(names.resolve(" NIKE AIR SHOE ", 5, 0.6), Resolution::Exact { row: 0 });
    assert_eq!(names.resolve("puma cap", 5, 0.6).row(), Some(3));
    assert!(names.resolve("Puma Cap", 5, 0.6).suggestions().is_empty());
}

#[test]
fn test_duplicate_names_resolve_to_first_row() {
    let names = resolver();
    assert_eq!(names.len(), 3);
    assert_eq!(names.row_of("nike air shoe"), Some(0));
}

#[test]
fn test_empty_query_is_blank() {
    let names = resolver();
    let resolution = names.resolve("", 5, 0.6);
    assert_eq!(resolution, Resolution::Blank);
    assert_eq!(resolution.row(), None);
    assert!(resolution.into_suggestions().is_empty());
}

#[test]
fn test_whitespace_query_is_a_miss_without_suggestions() {
    let names = resolver();
    assert_eq!(
        names.resolve("   ", 5, 0.6),
        Resolution::Miss {
            suggestions: Vec::new()
        }
    );
}

#[test]
fn test_miss_suggests_display_names() {
    let names = resolver();
    let resolution = names.resolve("Nike Air Sho", 5, 0.6);
    assert_eq!(resolution.row(), None);
    assert_eq!(resolution.suggestions(), ["Nike Air Shoe".to_string()]);
}

#[test]
fn test_miss_without_close_names() {
    let names = resolver();
    assert_eq!(
        names.resolve("zzzz", 5, 0.6),
        Resolution::Miss {
            suggestions: Vec::new()
        }
    );
}

#[test]
fn test_suggestion_limit_is_respected() {
    let names = resolver();
    assert!(names.resolve("nike air sho", 0, 0.6).suggestions().is_empty());
    // Cutoff 0 admits every distinct name
    assert_eq!(names.resolve("x", 2, 0.0).suggestions().len(), 2);
    assert_eq!(names.resolve("x", 10, 0.0).suggestions().len(), 3);
}

#[test]
fn test_search_uses_given_cutoff() {
    let names = resolver();
    assert_eq!(names.search("nike", 5, 0.4), vec!["Nike Air Shoe"]);
    assert!(names.search("nike", 5, 0.6).is_empty());
    assert_eq!(names.search("ADIDAS", 5, 0.4), vec!["Adidas Runner"]);
    assert!(names.search("nike", 0, 0.4).is_empty());
}

#[test]
fn test_resolution_serializes_with_kind_tag() {
    let json = serde_json::to_value(Resolution::Exact { row: 4 }).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "exact", "row": 4 }));
    let json = serde_json::to_value(Resolution::Blank).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "blank" }));
}
