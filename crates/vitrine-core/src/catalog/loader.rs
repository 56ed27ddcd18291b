//! CSV dataset reader.

use std::io::Read;

use csv::StringRecord;

use super::ProductRecord;
use crate::error::{Error, Result};

/// Header names the dataset must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Name",
    "Brand",
    "Category",
    "Tags",
    "Description",
    "Rating",
    "ReviewCount",
    "ImageURL",
];

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    brand: usize,
    category: usize,
    tags: usize,
    description: usize,
    rating: usize,
    review_count: usize,
    image_urls: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| Error::MissingColumn(column.to_string()))
        };
        Ok(Self {
            name: find("Name")?,
            brand: find("Brand")?,
            category: find("Category")?,
            tags: find("Tags")?,
            description: find("Description")?,
            rating: find("Rating")?,
            review_count: find("ReviewCount")?,
            image_urls: find("ImageURL")?,
        })
    }
}

/// Counts cells that held something other than a usable number.
#[derive(Default)]
struct InvalidNumbers {
    rating: usize,
    review_count: usize,
}

/// Reads raw records from CSV with a header row.
pub(crate) fn read_records<R: Read>(reader: R) -> Result<Vec<ProductRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let columns = Columns::from_headers(csv_reader.headers()?)?;

    let mut invalid = InvalidNumbers::default();
    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(ProductRecord {
            name: text_cell(&row, columns.name),
            brand: text_cell(&row, columns.brand),
            category: text_cell(&row, columns.category),
            tags: text_cell(&row, columns.tags),
            description: text_cell(&row, columns.description),
            rating: numeric_cell(&row, columns.rating, &mut invalid.rating),
            review_count: numeric_cell(&row, columns.review_count, &mut invalid.review_count),
            image_urls: text_cell(&row, columns.image_urls),
        });
    }

    if invalid.rating > 0 {
        tracing::warn!(
            column = "Rating",
            cells = invalid.rating,
            "Non-numeric cells treated as 0"
        );
    }
    if invalid.review_count > 0 {
        tracing::warn!(
            column = "ReviewCount",
            cells = invalid.review_count,
            "Non-numeric cells treated as 0"
        );
    }

    Ok(records)
}

fn text_cell(row: &StringRecord, index: usize) -> Option<String> {
    row.get(index)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

/// Empty cells are missing values. Unparsable or non-finite cells are missing
/// too, but are counted so the caller can report them.
fn numeric_cell(row: &StringRecord, index: usize, invalid: &mut usize) -> Option<f64> {
    let cell = row.get(index)?.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(value) if value.is_nan() => None,
        _ => {
            *invalid += 1;
            None
        }
    }
}
