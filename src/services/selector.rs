use crate::services::scorer::ScoredCandidate;

/// Picks the best `n` candidates
///
/// Orders by score descending, then average rating descending. The sort is
/// stable, so candidates tied on both keys keep their original catalog order.
pub fn select_top_n(mut scored: Vec<ScoredCandidate>, n: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.record.average_rating.total_cmp(&a.record.average_rating))
    });
    scored.truncate(n);
    scored
}
