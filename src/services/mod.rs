mod encoder;
mod normalizer;
mod recommender;
mod sampler;
mod scorer;
mod selector;
mod similarity;

pub use encoder::GenreEncoder;
pub use normalizer::LengthNormalizer;
pub use recommender::{Recommender, ScoringProfile};
pub use sampler::{sample_pair, SamplerError};
pub use scorer::{score_candidate, ScoredCandidate, Weights, WEIGHTS};
pub use selector::select_top_n;
