use std::collections::BTreeSet;

use crate::models::BookRecord;

/// Binary genre encoding over a fixed vocabulary
///
/// The vocabulary is every distinct genre token observed across the broad
/// catalog, sorted lexicographically so vectors are comparable across calls
/// and across processes given the same catalog.
#[derive(Debug, Clone)]
pub struct GenreEncoder {
    vocabulary: Vec<String>,
}

impl GenreEncoder {
    /// Collects the vocabulary from the given records; records with no genre
    /// data contribute nothing
    pub fn fit(records: &[BookRecord]) -> Self {
        let vocabulary: BTreeSet<String> = records
            .iter()
            .flat_map(|record| record.genres.iter().cloned())
            .collect();
        Self {
            vocabulary: vocabulary.into_iter().collect(),
        }
    }

    /// Encodes a genre set as a binary vector of vocabulary length; genres
    /// outside the vocabulary are silently ignored
    pub fn encode(&self, genres: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for genre in genres {
            if let Ok(index) = self.vocabulary.binary_search(genre) {
                vector[index] = 1.0;
            }
        }
        vector
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Vector dimensionality
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeBucket;

    fn record(genres: &[&str]) -> BookRecord {
        BookRecord {
            position: 0,
            title: "test".to_string(),
            authors: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            num_pages: Some(200.0),
            size_bucket: Some(SizeBucket::Short),
            average_rating: 4.0,
            ratings_count: Some(100),
        }
    }

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_is_sorted_and_distinct() {
        let encoder = GenreEncoder::fit(&[
            record(&["Fantasy", "Drama"]),
            record(&["Drama", "Classics"]),
            record(&[]),
        ]);
        assert_eq!(encoder.vocabulary(), &["Classics", "Drama", "Fantasy"]);
    }

    #[test]
    fn test_encode_marks_present_genres() {
        let encoder = GenreEncoder::fit(&[record(&["Classics", "Drama", "Fantasy"])]);
        assert_eq!(encoder.encode(&genres(&["Fantasy"])), vec![0.0, 0.0, 1.0]);
        assert_eq!(
            encoder.encode(&genres(&["Drama", "Fantasy"])),
            vec![0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_encode_is_order_independent() {
        let encoder = GenreEncoder::fit(&[record(&["Classics", "Drama", "Fantasy"])]);
        assert_eq!(
            encoder.encode(&genres(&["Fantasy", "Drama"])),
            encoder.encode(&genres(&["Drama", "Fantasy"]))
        );
    }

    #[test]
    fn test_encode_ignores_unknown_genres() {
        let encoder = GenreEncoder::fit(&[record(&["Fantasy"])]);
        assert_eq!(encoder.encode(&genres(&["Western", "Fantasy"])), vec![1.0]);
        assert_eq!(encoder.encode(&genres(&["Western"])), vec![0.0]);
    }

    #[test]
    fn test_empty_fit_yields_empty_vectors() {
        let encoder = GenreEncoder::fit(&[]);
        assert!(encoder.is_empty());
        assert!(encoder.encode(&genres(&["Fantasy"])).is_empty());
    }
}
