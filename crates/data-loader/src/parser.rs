//! Parser for the movie catalog CSV.
//!
//! The catalog is a header-first CSV export (one row per movie). Columns are
//! located by header name, so column order and extra columns such as
//! `budget` or `popularity` don't matter:
//! - `title` is required
//! - `genres`, `keywords`, `tagline`, `cast`, `director`, `overview`,
//!   `release_date` and `vote_average` are optional
//!
//! Empty cells become `None`, and so does a non-finite `vote_average`
//! (`nan` is how pandas exports write a missing number).

use crate::error::{DataLoadError, Result};
use crate::types::Item;
use csv::StringRecord;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Header positions of the columns we care about
#[derive(Debug)]
struct ColumnMap {
    title: usize,
    genres: Option<usize>,
    keywords: Option<usize>,
    tagline: Option<usize>,
    cast: Option<usize>,
    director: Option<usize>,
    overview: Option<usize>,
    release_date: Option<usize>,
    vote_average: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, source: &str) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let title = find("title").ok_or_else(|| DataLoadError::MissingColumn {
            file: source.to_string(),
            column: "title".to_string(),
        })?;

        Ok(Self {
            title,
            genres: find("genres"),
            keywords: find("keywords"),
            tagline: find("tagline"),
            cast: find("cast"),
            director: find("director"),
            overview: find("overview"),
            release_date: find("release_date"),
            vote_average: find("vote_average"),
        })
    }
}

/// Read a cell, mapping an absent column or an empty cell to `None`
fn cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    let value = record.get(column?)?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse the catalog CSV at `path`.
pub fn parse_catalog(path: &Path) -> Result<Vec<Item>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_items(file, &source)
}

/// Parse catalog rows from any reader.
///
/// `source` is only used in error messages. Rows with an empty title are
/// skipped: they could never be resolved from a query.
pub fn parse_items<R: Read>(reader: R, source: &str) -> Result<Vec<Item>> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = ColumnMap::from_headers(reader.headers()?, source)?;
    debug!(?columns, "Resolved catalog columns for {}", source);

    let mut items = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let line_no = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();

        let title = record.get(columns.title).unwrap_or_default();
        if title.trim().is_empty() {
            skipped += 1;
            continue;
        }

        let vote_average = match cell(&record, columns.vote_average) {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map(|value| value.is_finite().then_some(value))
                .map_err(|e| DataLoadError::ParseError {
                    file: source.to_string(),
                    line: line_no,
                    reason: format!("Invalid vote_average '{}': {}", raw, e),
                })?,
            None => None,
        };

        items.push(Item {
            id: items.len(),
            title: title.to_string(),
            genres: cell(&record, columns.genres),
            keywords: cell(&record, columns.keywords),
            tagline: cell(&record, columns.tagline),
            cast: cell(&record, columns.cast),
            director: cell(&record, columns.director),
            overview: cell(&record, columns.overview),
            release_date: cell(&record, columns.release_date),
            vote_average,
        });
    }

    if skipped > 0 {
        warn!("Skipped {} rows without a title in {}", skipped, source);
    }

    Ok(items)
}
