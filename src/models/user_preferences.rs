use serde::{Deserialize, Serialize};

use super::{BookRecord, SizeBucket};

/// Snapshot of a book the user chose during a comparison round
///
/// Captures only what profile building needs, as of the time of the pick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferencePick {
    /// The chosen record's index in the broad catalog
    pub position: usize,
    pub genres: Vec<String>,
    pub num_pages: Option<f64>,
}

impl From<&BookRecord> for ReferencePick {
    fn from(record: &BookRecord) -> Self {
        Self {
            position: record.position,
            genres: record.genres.clone(),
            num_pages: record.num_pages,
        }
    }
}

/// A session's stated preferences plus accumulated reference picks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Genres the user selected up front
    pub genres: Vec<String>,
    /// Preferred book length
    pub size_bucket: SizeBucket,
    /// Picks from the comparison rounds, in round order
    pub references: Vec<ReferencePick>,
}

impl UserPreferences {
    /// Creates preferences with no reference picks yet
    pub fn new(genres: Vec<String>, size_bucket: SizeBucket) -> Self {
        Self {
            genres,
            size_bucket,
            references: Vec::new(),
        }
    }

    /// Records a comparison-round pick
    pub fn add_reference(&mut self, record: &BookRecord) {
        self.references.push(ReferencePick::from(record));
    }

    /// The most recent pick, carried forward into the next round's pair
    pub fn last_reference(&self) -> Option<&ReferencePick> {
        self.references.last()
    }
}
