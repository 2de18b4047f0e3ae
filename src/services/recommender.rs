use crate::models::{BookRecord, SizeBucket, UserPreferences};
use crate::services::encoder::GenreEncoder;
use crate::services::normalizer::LengthNormalizer;
use crate::services::scorer::{score_candidate, ScoredCandidate, Weights};
use crate::services::selector::select_top_n;

/// A session's preferences distilled into scoring inputs
///
/// Built fresh per recommendation request from a [`UserPreferences`] snapshot
/// and the fit parameters; never mutated after construction.
#[derive(Debug, Clone)]
pub struct ScoringProfile {
    /// Binary vector over the genre vocabulary for the stated genres
    pub genre_vector: Vec<f64>,
    /// Normalized midpoint of the preferred bucket's page range
    pub length_target: f64,
    /// Elementwise mean of the reference picks' (genre, length) vectors;
    /// all zeros when there are no picks
    pub reference_centroid: Vec<f64>,
    pub size_bucket: SizeBucket,
}

/// The recommendation engine's catalog-derived fit state
///
/// Fit once at startup from the broad catalog and shared read-only across
/// requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    encoder: GenreEncoder,
    normalizer: LengthNormalizer,
    /// Largest page count in the broad catalog; stands in for the open-ended
    /// top bucket's upper bound
    max_pages: Option<f64>,
}

impl Recommender {
    /// Fits the vocabulary and page-count scale from the broad catalog
    pub fn fit(broad: &[BookRecord]) -> Self {
        let max_pages = broad
            .iter()
            .filter_map(|record| record.num_pages)
            .reduce(f64::max);

        Self {
            encoder: GenreEncoder::fit(broad),
            normalizer: LengthNormalizer::fit(broad),
            max_pages,
        }
    }

    pub fn encoder(&self) -> &GenreEncoder {
        &self.encoder
    }

    pub fn normalizer(&self) -> &LengthNormalizer {
        &self.normalizer
    }

    /// Builds a scoring profile from stated preferences and reference picks
    pub fn build_profile(&self, prefs: &UserPreferences) -> ScoringProfile {
        let genre_vector = self.encoder.encode(&prefs.genres);

        let (lo, hi) = prefs.size_bucket.bounds();
        let resolved_hi = hi.or(self.max_pages).unwrap_or(lo);
        let midpoint = (lo + resolved_hi) / 2.0;
        let length_target = self.normalizer.normalize(midpoint);

        let dimension = self.encoder.len() + 1;
        let mut reference_centroid = vec![0.0; dimension];
        if !prefs.references.is_empty() {
            for reference in &prefs.references {
                let genre_vec = self.encoder.encode(&reference.genres);
                for (slot, value) in reference_centroid.iter_mut().zip(genre_vec) {
                    *slot += value;
                }
                reference_centroid[dimension - 1] += reference
                    .num_pages
                    .map_or(0.0, |pages| self.normalizer.normalize(pages));
            }
            let count = prefs.references.len() as f64;
            for slot in &mut reference_centroid {
                *slot /= count;
            }
        }

        ScoringProfile {
            genre_vector,
            length_target,
            reference_centroid,
            size_bucket: prefs.size_bucket,
        }
    }

    /// Scores every candidate against the profile
    pub fn score_candidates(
        &self,
        candidates: &[BookRecord],
        profile: &ScoringProfile,
        weights: &Weights,
    ) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|candidate| {
                let genre_vector = self.encoder.encode(&candidate.genres);
                let score =
                    score_candidate(candidate, profile, weights, &genre_vector, &self.normalizer);
                ScoredCandidate {
                    record: candidate.clone(),
                    score,
                }
            })
            .collect()
    }

    /// Builds the profile, scores the candidate pool, and returns the top `n`
    pub fn recommend(
        &self,
        candidates: &[BookRecord],
        prefs: &UserPreferences,
        weights: &Weights,
        n: usize,
    ) -> Vec<ScoredCandidate> {
        let profile = self.build_profile(prefs);
        let scored = self.score_candidates(candidates, &profile, weights);
        select_top_n(scored, n)
    }
}
