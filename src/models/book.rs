use serde::{Deserialize, Serialize};

/// Named page-count range classifying book length
///
/// The four buckets partition `[0, ∞)` into half-open intervals; the last
/// bucket has no upper bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    Short,
    Medium,
    Long,
    ExtraLong,
}

impl SizeBucket {
    /// All buckets in ascending page-count order
    pub const ALL: [SizeBucket; 4] = [
        SizeBucket::Short,
        SizeBucket::Medium,
        SizeBucket::Long,
        SizeBucket::ExtraLong,
    ];

    /// The bucket's half-open interval `[lo, hi)`; `None` marks the
    /// open-ended upper bound of the last bucket
    pub fn bounds(self) -> (f64, Option<f64>) {
        match self {
            SizeBucket::Short => (0.0, Some(250.0)),
            SizeBucket::Medium => (250.0, Some(500.0)),
            SizeBucket::Long => (500.0, Some(700.0)),
            SizeBucket::ExtraLong => (700.0, None),
        }
    }

    /// Classifies a page count, `None` in means `None` out
    pub fn for_pages(pages: Option<f64>) -> Option<SizeBucket> {
        let pages = pages?;
        SizeBucket::ALL.into_iter().find(|bucket| {
            let (lo, hi) = bucket.bounds();
            lo <= pages && hi.map_or(true, |hi| pages < hi)
        })
    }
}

/// A single catalog entry
///
/// `position` is the record's index in its source catalog and doubles as its
/// identifier for pair rounds. `size_bucket` is always derived from
/// `num_pages` during preprocessing, never supplied by the data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookRecord {
    pub position: usize,
    pub title: String,
    pub authors: Option<String>,
    pub genres: Vec<String>,
    pub num_pages: Option<f64>,
    pub size_bucket: Option<SizeBucket>,
    pub average_rating: f64,
    pub ratings_count: Option<u64>,
}

impl BookRecord {
    /// True if any of the record's genres appears in `wanted`
    pub fn matches_any_genre(&self, wanted: &[String]) -> bool {
        self.genres.iter().any(|g| wanted.contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_partition_page_counts() {
        // Every boundary and interior point lands in exactly one bucket
        for pages in [0.0, 1.0, 249.0, 250.0, 499.9, 500.0, 699.0, 700.0, 10_000.0] {
            let hits = SizeBucket::ALL
                .into_iter()
                .filter(|bucket| {
                    let (lo, hi) = bucket.bounds();
                    lo <= pages && hi.map_or(true, |hi| pages < hi)
                })
                .count();
            assert_eq!(hits, 1, "pages {} must fall in exactly one bucket", pages);
        }
    }

    #[test]
    fn test_bucket_boundaries_are_half_open() {
        assert_eq!(SizeBucket::for_pages(Some(249.0)), Some(SizeBucket::Short));
        assert_eq!(SizeBucket::for_pages(Some(250.0)), Some(SizeBucket::Medium));
        assert_eq!(SizeBucket::for_pages(Some(500.0)), Some(SizeBucket::Long));
        assert_eq!(
            SizeBucket::for_pages(Some(700.0)),
            Some(SizeBucket::ExtraLong)
        );
    }

    #[test]
    fn test_top_bucket_is_unbounded() {
        assert_eq!(
            SizeBucket::for_pages(Some(1_000_000.0)),
            Some(SizeBucket::ExtraLong)
        );
        assert_eq!(SizeBucket::ExtraLong.bounds().1, None);
    }

    #[test]
    fn test_missing_pages_have_no_bucket() {
        assert_eq!(SizeBucket::for_pages(None), None);
    }

    #[test]
    fn test_bucket_serialization() {
        let json = serde_json::to_string(&SizeBucket::ExtraLong).unwrap();
        assert_eq!(json, "\"extra_long\"");
        let back: SizeBucket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SizeBucket::ExtraLong);
    }

    #[test]
    fn test_matches_any_genre() {
        let record = BookRecord {
            position: 0,
            title: "The Hobbit".to_string(),
            authors: Some("J.R.R. Tolkien".to_string()),
            genres: vec!["Fantasy".to_string(), "Adventure".to_string()],
            num_pages: Some(310.0),
            size_bucket: Some(SizeBucket::Medium),
            average_rating: 4.28,
            ratings_count: Some(3_000_000),
        };
        assert!(record.matches_any_genre(&["Fantasy".to_string()]));
        assert!(!record.matches_any_genre(&["Horror".to_string()]));
        assert!(!record.matches_any_genre(&[]));
    }
}
