use rand::seq::index;
use rand::Rng;

use crate::models::{BookRecord, ReferencePick, UserPreferences};

/// Largest pool a pair is drawn from, after filtering and ranking
const POOL_LIMIT: usize = 50;

/// Errors raised while sampling a comparison pair
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("insufficient candidates: round needs {needed}, pool has {available}")]
    InsufficientCandidates { needed: usize, available: usize },

    #[error("unknown reference position: {0}")]
    UnknownReference(usize),
}

/// Draws the two books for a comparison round
///
/// The pool is the broad catalog filtered to records sharing a genre with the
/// preferences and sitting in the preferred size bucket, ranked by ratings
/// count and cut to the top fifty. Round one draws two distinct records
/// uniformly; later rounds carry `previous` forward verbatim (first element)
/// and draw one new record from the rest of the pool.
pub fn sample_pair(
    broad: &[BookRecord],
    prefs: &UserPreferences,
    previous: Option<&ReferencePick>,
    rng: &mut impl Rng,
) -> Result<(BookRecord, BookRecord), SamplerError> {
    let mut pool: Vec<&BookRecord> = broad
        .iter()
        .filter(|record| {
            record.matches_any_genre(&prefs.genres)
                && record.size_bucket == Some(prefs.size_bucket)
        })
        .collect();

    // Descending ratings count, records without one last; stable on ties
    pool.sort_by(|a, b| b.ratings_count.cmp(&a.ratings_count));
    pool.truncate(POOL_LIMIT);

    match previous {
        None => {
            if pool.len() < 2 {
                return Err(SamplerError::InsufficientCandidates {
                    needed: 2,
                    available: pool.len(),
                });
            }
            let picks = index::sample(rng, pool.len(), 2);
            Ok((pool[picks.index(0)].clone(), pool[picks.index(1)].clone()))
        }
        Some(previous) => {
            let carried = broad
                .get(previous.position)
                .ok_or(SamplerError::UnknownReference(previous.position))?;

            let remaining: Vec<&BookRecord> = pool
                .into_iter()
                .filter(|record| record.position != previous.position)
                .collect();
            if remaining.is_empty() {
                return Err(SamplerError::InsufficientCandidates {
                    needed: 1,
                    available: 0,
                });
            }
            let pick = remaining[rng.gen_range(0..remaining.len())];
            Ok((carried.clone(), pick.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeBucket;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn book(position: usize, genres: &[&str], pages: f64, ratings: Option<u64>) -> BookRecord {
        BookRecord {
            position,
            title: format!("book {}", position),
            authors: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            num_pages: Some(pages),
            size_bucket: SizeBucket::for_pages(Some(pages)),
            average_rating: 4.0,
            ratings_count: ratings,
        }
    }

    fn catalog() -> Vec<BookRecord> {
        vec![
            book(0, &["Fantasy"], 120.0, Some(900)),
            book(1, &["Fantasy", "Adventure"], 200.0, Some(500)),
            book(2, &["Fantasy"], 240.0, Some(700)),
            book(3, &["Fantasy"], 400.0, Some(9_000)), // medium, filtered out
            book(4, &["Horror"], 150.0, Some(8_000)),  // wrong genre
            book(5, &["Fantasy"], 90.0, None),
        ]
    }

    fn prefs() -> UserPreferences {
        UserPreferences::new(vec!["Fantasy".to_string()], SizeBucket::Short)
    }

    #[test]
    fn test_round_one_draws_two_distinct_pool_members() {
        let broad = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let (first, second) = sample_pair(&broad, &prefs(), None, &mut rng).unwrap();

        assert_ne!(first.position, second.position);
        for record in [&first, &second] {
            assert!(record.matches_any_genre(&["Fantasy".to_string()]));
            assert_eq!(record.size_bucket, Some(SizeBucket::Short));
        }
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let broad = catalog();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let pair_a = sample_pair(&broad, &prefs(), None, &mut a).unwrap();
        let pair_b = sample_pair(&broad, &prefs(), None, &mut b).unwrap();
        assert_eq!(pair_a, pair_b);
    }

    #[test]
    fn test_later_rounds_carry_previous_choice_forward() {
        let broad = catalog();
        let previous = ReferencePick::from(&broad[2]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (first, second) =
                sample_pair(&broad, &prefs(), Some(&previous), &mut rng).unwrap();
            assert_eq!(first.position, 2);
            assert_ne!(second.position, 2);
        }
    }

    #[test]
    fn test_empty_pool_is_insufficient() {
        let broad = catalog();
        let no_match = UserPreferences::new(vec!["Romance".to_string()], SizeBucket::Short);
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_pair(&broad, &no_match, None, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::InsufficientCandidates {
                needed: 2,
                available: 0
            }
        ));
    }

    #[test]
    fn test_single_candidate_cannot_form_a_pair() {
        let broad = vec![book(0, &["Fantasy"], 100.0, Some(10))];
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_pair(&broad, &prefs(), None, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::InsufficientCandidates {
                needed: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_carried_choice_with_exhausted_pool_is_insufficient() {
        let broad = vec![book(0, &["Fantasy"], 100.0, Some(10))];
        let previous = ReferencePick::from(&broad[0]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_pair(&broad, &prefs(), Some(&previous), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SamplerError::InsufficientCandidates {
                needed: 1,
                available: 0
            }
        ));
    }

    #[test]
    fn test_unknown_reference_position_is_rejected() {
        let broad = catalog();
        let previous = ReferencePick {
            position: 99,
            genres: vec!["Fantasy".to_string()],
            num_pages: Some(100.0),
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_pair(&broad, &prefs(), Some(&previous), &mut rng).unwrap_err();
        assert!(matches!(err, SamplerError::UnknownReference(99)));
    }

    #[test]
    fn test_pool_ranks_by_ratings_count_before_cut() {
        // Fill past the pool limit so only the fifty most-rated survive
        let mut broad: Vec<BookRecord> = (0..60)
            .map(|i| book(i, &["Fantasy"], 100.0, Some(i as u64)))
            .collect();
        broad.push(book(60, &["Fantasy"], 100.0, None));

        let previous = ReferencePick::from(&broad[59]);
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, fresh) = sample_pair(&broad, &prefs(), Some(&previous), &mut rng).unwrap();
            // Positions 0..=9 and the unrated record fall below the cut
            assert!(fresh.position >= 10 && fresh.position < 60);
        }
    }
}
