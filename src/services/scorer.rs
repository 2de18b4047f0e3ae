use serde::Serialize;

use crate::models::{BookRecord, SizeBucket};
use crate::services::normalizer::LengthNormalizer;
use crate::services::recommender::ScoringProfile;
use crate::services::similarity::{cosine, dot, norm};

/// Blend weights for the three scoring factors
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub genre: f64,
    pub length: f64,
    pub reference: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.genre + self.length + self.reference
    }
}

/// Process-wide scoring weights
pub const WEIGHTS: Weights = Weights {
    genre: 0.5,
    length: 0.25,
    reference: 0.25,
};

/// A candidate book with its blended score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub record: BookRecord,
    pub score: f64,
}

/// Scores one candidate against a profile
///
/// The result is the weighted sum of the genre, length, and reference
/// factors, each nominally in `[0, 1]`. Computed independently per candidate;
/// no shared state.
pub fn score_candidate(
    candidate: &BookRecord,
    profile: &ScoringProfile,
    weights: &Weights,
    genre_vector: &[f64],
    normalizer: &LengthNormalizer,
) -> f64 {
    let genre = genre_score(genre_vector, &profile.genre_vector);
    let length = length_score(candidate.num_pages, profile.size_bucket);
    let reference = reference_score(genre_vector, candidate.num_pages, profile, normalizer);

    weights.genre * genre + weights.length * length + weights.reference * reference
}

/// Fraction of the user's chosen genres the candidate also has; 0.0 when the
/// user selected nothing in vocabulary
fn genre_score(candidate_vector: &[f64], user_vector: &[f64]) -> f64 {
    let selected: f64 = user_vector.iter().sum();
    if selected == 0.0 {
        return 0.0;
    }
    dot(candidate_vector, user_vector) / selected
}

/// 1.0 inside the bucket interval, linear decay outside it
///
/// The decay span is the bucket width; the unbounded top bucket falls back to
/// its lower bound as the span. Missing page counts score 0.0.
fn length_score(pages: Option<f64>, bucket: SizeBucket) -> f64 {
    let Some(pages) = pages else {
        return 0.0;
    };
    let (lo, hi) = bucket.bounds();
    if pages < lo {
        let span = hi.map_or(lo, |hi| hi - lo);
        return (1.0 - (lo - pages) / span).max(0.0);
    }
    match hi {
        Some(hi) if pages >= hi => (1.0 - (pages - hi) / (hi - lo)).max(0.0),
        _ => 1.0,
    }
}

/// Cosine similarity between the candidate's concatenated
/// (genre-vector, normalized-length) vector and the reference centroid
///
/// 0.0 when no references exist (zero centroid) or the similarity is
/// undefined.
fn reference_score(
    genre_vector: &[f64],
    pages: Option<f64>,
    profile: &ScoringProfile,
    normalizer: &LengthNormalizer,
) -> f64 {
    if norm(&profile.reference_centroid) == 0.0 {
        return 0.0;
    }
    let mut candidate_vector = genre_vector.to_vec();
    candidate_vector.push(pages.map_or(0.0, |p| normalizer.normalize(p)));
    cosine(&candidate_vector, &profile.reference_centroid).unwrap_or(0.0)
}
