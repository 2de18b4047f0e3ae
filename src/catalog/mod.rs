use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::models::{BookRecord, SizeBucket};

/// Errors raised while loading catalog files
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One row of a catalog file, before preprocessing
///
/// Fields mirror the ingestion contract: `genre` is a comma-separated string,
/// `num_pages` may arrive as a number, a numeric string, or garbage. Anything
/// unparseable degrades to a missing value rather than failing the load.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBookRow {
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub num_pages: Option<Value>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub ratings_count: Option<u64>,
}

impl RawBookRow {
    /// Converts a raw row into a preprocessed record at catalog index `position`
    fn into_record(self, position: usize) -> BookRecord {
        let genres = parse_genres(self.genre.as_deref());
        let num_pages = parse_pages(self.num_pages.as_ref());
        let size_bucket = SizeBucket::for_pages(num_pages);

        BookRecord {
            position,
            title: self.title,
            authors: self.authors,
            genres,
            num_pages,
            size_bucket,
            average_rating: self.average_rating.unwrap_or(0.0),
            ratings_count: self.ratings_count,
        }
    }
}

/// Splits a comma-separated genre string into tokens, trimming whitespace
/// and dropping empties; a missing string yields no genres
fn parse_genres(genre: Option<&str>) -> Vec<String> {
    genre
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Coerces a page-count field to a finite non-negative number, `None` on
/// anything else
fn parse_pages(value: Option<&Value>) -> Option<f64> {
    let pages = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (pages.is_finite() && pages >= 0.0).then_some(pages)
}

/// The two immutable book tables, preprocessed and ready for the engine
///
/// `broad` fits the vocabulary and normalizer and sources comparison-round
/// pairs; `niche` is the pool final recommendations are drawn from.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pub broad: Vec<BookRecord>,
    pub niche: Vec<BookRecord>,
}

impl CatalogStore {
    /// Preprocesses raw rows into the two catalogs
    pub fn from_rows(broad: Vec<RawBookRow>, niche: Vec<RawBookRow>) -> Self {
        Self {
            broad: preprocess(broad),
            niche: preprocess(niche),
        }
    }

    /// Loads and preprocesses both catalog files
    pub fn load(broad_path: &Path, niche_path: &Path) -> Result<Self, CatalogError> {
        let broad: Vec<RawBookRow> = serde_json::from_str(&fs::read_to_string(broad_path)?)?;
        let niche: Vec<RawBookRow> = serde_json::from_str(&fs::read_to_string(niche_path)?)?;
        Ok(Self::from_rows(broad, niche))
    }

    /// Looks up a broad-catalog record by its original position
    pub fn broad_record(&self, position: usize) -> Option<&BookRecord> {
        self.broad.get(position)
    }
}

fn preprocess(rows: Vec<RawBookRow>) -> Vec<BookRecord> {
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| row.into_record(position))
        .collect()
}
