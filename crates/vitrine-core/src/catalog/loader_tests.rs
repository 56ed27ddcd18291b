//! Tests for CSV loading, cleaning and dataset location.

use std::path::PathBuf;

use tempfile::TempDir;

use super::{Catalog, DataLocator, ProductRecord};
use crate::error::Error;

const HEADER: &str = "Name,Brand,Category,Tags,Description,Rating,ReviewCount,ImageURL\n";

fn catalog_from(body: &str) -> Result<Catalog, Error> {
    let data = format!("{HEADER}{body}");
    Catalog::from_reader(data.as_bytes())
}

#[test]
fn test_loads_rows_in_source_order() {
    let catalog = catalog_from(
        "Alpha Soap,Acme,Bath,soap,Gentle soap,4.5,120,a.jpg|b.jpg\n\
         Beta Shampoo,Acme,Hair,shampoo,Daily shampoo,3.0,10,c.jpg\n",
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0).unwrap().name, "Alpha Soap");
    assert_eq!(catalog.get(1).unwrap().name, "Beta Shampoo");
    assert_eq!(catalog.get(0).unwrap().normalized_name, "alpha soap");
    assert_eq!(catalog.get(0).unwrap().primary_image(), Some("a.jpg"));
}

#[test]
fn test_missing_fields_become_empty_and_zero() {
    let catalog = catalog_from(",,,,,,,\nOnly Name,,,,,,,\n").unwrap();

    let blank = catalog.get(0).unwrap();
    assert_eq!(blank.name, "");
    assert_eq!(blank.normalized_name, "");
    assert_eq!(blank.brand, "");
    assert!(blank.rating.abs() < f64::EPSILON);
    assert!(blank.review_count.abs() < f64::EPSILON);
    assert!(blank.popularity.abs() < f64::EPSILON);
    assert_eq!(blank.primary_image(), None);

    assert_eq!(catalog.get(1).unwrap().combined_text, "only name    ");
}

#[test]
fn test_negative_and_invalid_numbers_are_clipped() {
    let catalog = catalog_from(
        "A,,,,,-3,-10,\n\
         B,,,,,abc,inf,\n\
         C,,,,,nan,5,\n\
         D,,,,,4,0,\n",
    )
    .unwrap();

    let ratings: Vec<f64> = catalog.iter().map(|p| p.rating).collect();
    let reviews: Vec<f64> = catalog.iter().map(|p| p.review_count).collect();
    assert_eq!(ratings, vec![0.0, 0.0, 0.0, 4.0]);
    assert_eq!(reviews, vec![0.0, 0.0, 5.0, 0.0]);
    for product in &catalog {
        assert!((0.0..=1.0).contains(&product.popularity));
    }
}

#[test]
fn test_extra_columns_are_ignored_and_order_is_free() {
    let data = "Id,ImageURL,ReviewCount,Rating,Description,Tags,Category,Brand,Name\n\
                7,x.png,3,2.5,Desc,tag,Cat,Brand,Widget\n";
    let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
    let widget = catalog.get(0).unwrap();
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.brand, "Brand");
    assert!((widget.rating - 2.5).abs() < f64::EPSILON);
    assert!((widget.review_count - 3.0).abs() < f64::EPSILON);
    assert_eq!(widget.image_urls, "x.png");
}

#[test]
fn test_missing_required_column() {
    let data = "Name,Brand,Category,Tags,Description,Rating,ImageURL\nA,B,C,D,E,1,x\n";
    let err = Catalog::from_reader(data.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "ReviewCount"));
}

#[test]
fn test_header_only_is_empty_dataset() {
    let err = catalog_from("").unwrap_err();
    assert!(matches!(err, Error::EmptyDataset));
}

#[test]
fn test_ragged_row_is_csv_error() {
    let err = catalog_from("A,B\n").unwrap_err();
    assert!(matches!(err, Error::Csv(_)));
}

#[test]
fn test_quoted_fields_with_commas() {
    let catalog =
        catalog_from("\"Gel, Extra Hold\",Acme,Hair,\"gel,hold\",\"Strong, lasting\",5,1,\n")
            .unwrap();
    assert_eq!(catalog.get(0).unwrap().name, "Gel, Extra Hold");
    assert_eq!(catalog.get(0).unwrap().tags, "gel,hold");
}

#[test]
fn test_from_records_empty() {
    assert!(matches!(
        Catalog::from_records(Vec::new()),
        Err(Error::EmptyDataset)
    ));
}

#[test]
fn test_from_records_builder() {
    let catalog = Catalog::from_records(vec![ProductRecord::named(" Nike Shoe ")
        .with_brand("Nike")
        .with_reviews(4.0, 10.0)
        .with_image_urls(" | front.jpg|back.jpg")])
    .unwrap();
    let shoe = catalog.get(0).unwrap();
    assert_eq!(shoe.normalized_name, "nike shoe");
    assert_eq!(shoe.primary_image(), Some("front.jpg"));
    assert!((shoe.popularity - 1.0).abs() < 1e-12);
}

#[test]
fn test_from_path_missing_file_is_data_not_found() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::from_path(dir.path().join("absent.csv")).unwrap_err();
    match err {
        Error::DataNotFound { filename, searched } => {
            assert_eq!(filename, "absent.csv");
            assert_eq!(searched, vec![dir.path().to_path_buf()]);
        }
        other => panic!("expected DataNotFound, got {other:?}"),
    }
}

#[test]
fn test_from_path_bare_file_name_searches_current_dir() {
    let err = Catalog::from_path("vitrine-no-such-dataset.csv").unwrap_err();
    match err {
        Error::DataNotFound { filename, searched } => {
            assert_eq!(filename, "vitrine-no-such-dataset.csv");
            assert_eq!(searched, vec![PathBuf::from(".")]);
        }
        other => panic!("expected DataNotFound, got {other:?}"),
    }
}

#[test]
fn test_locator_prefers_first_directory() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir(root.path().join("data")).unwrap();
    std::fs::write(root.path().join("data/items.csv"), HEADER).unwrap();
    std::fs::write(root.path().join("items.csv"), HEADER).unwrap();

    let locator = DataLocator::new(
        root.path(),
        vec![PathBuf::from("data"), PathBuf::from(".")],
    );
    let found = locator.resolve("items.csv").unwrap();
    assert_eq!(found, root.path().join("data").join("items.csv"));
}

#[test]
fn test_locator_falls_back_to_later_directory() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("items.csv"), HEADER).unwrap();

    let locator = DataLocator::new(
        root.path(),
        vec![PathBuf::from("data"), PathBuf::from(".")],
    );
    assert_eq!(
        locator.resolve("items.csv").unwrap(),
        root.path().join(".").join("items.csv")
    );
}

#[test]
fn test_locator_reports_every_directory() {
    let root = TempDir::new().unwrap();
    let locator = DataLocator::new(
        root.path(),
        vec![PathBuf::from("data"), PathBuf::from("fixtures")],
    );

    assert!(locator.resolve_optional("items.csv").is_none());
    match locator.resolve("items.csv") {
        Err(Error::DataNotFound { filename, searched }) => {
            assert_eq!(filename, "items.csv");
            assert_eq!(searched.len(), 2);
            assert!(searched[0].ends_with("data"));
            assert!(searched[1].ends_with("fixtures"));
        }
        other => panic!("expected DataNotFound, got {other:?}"),
    }
}

#[test]
fn test_locator_ignores_directories_named_like_the_file() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("data/items.csv")).unwrap();
    let locator = DataLocator::new(root.path(), vec![PathBuf::from("data")]);
    assert!(locator.resolve_optional("items.csv").is_none());
}
