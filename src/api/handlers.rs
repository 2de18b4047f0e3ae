use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{BookRecord, SizeBucket, UserPreferences};
use crate::services::{sample_pair, ScoredCandidate, WEIGHTS};

use super::state::{AppState, Session};

/// Recommendations returned when the client does not ask for a count
const DEFAULT_LIMIT: usize = 10;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub position: usize,
    pub title: String,
    pub authors: Option<String>,
    pub genres: Vec<String>,
    pub num_pages: Option<f64>,
    pub size_bucket: Option<SizeBucket>,
    pub average_rating: f64,
    pub ratings_count: Option<u64>,
}

impl From<&BookRecord> for BookResponse {
    fn from(record: &BookRecord) -> Self {
        Self {
            position: record.position,
            title: record.title.clone(),
            authors: record.authors.clone(),
            genres: record.genres.clone(),
            num_pages: record.num_pages,
            size_bucket: record.size_bucket,
            average_rating: record.average_rating,
            ratings_count: record.ratings_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BucketOption {
    pub key: SizeBucket,
    pub lo: f64,
    /// `None` for the open-ended top bucket
    pub hi: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BucketsResponse {
    pub buckets: Vec<BucketOption>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub genres: Vec<String>,
    pub size_bucket: SizeBucket,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub round: u8,
    pub rounds_complete: bool,
    pub references: usize,
    pub created_at: DateTime<Utc>,
}

impl SessionResponse {
    fn new(id: Uuid, session: &Session) -> Self {
        Self {
            session_id: id,
            round: session.round,
            rounds_complete: session.rounds_complete(),
            references: session.prefs.references.len(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PairResponse {
    pub round: u8,
    pub pair: Vec<BookResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    /// Broad-catalog position of the chosen book; `null` skips the round
    pub position: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationEntry {
    pub score: f64,
    pub book: BookResponse,
}

impl From<&ScoredCandidate> for RecommendationEntry {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            score: candidate.score,
            book: BookResponse::from(&candidate.record),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationEntry>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// The genre vocabulary, for the preferences form
pub async fn get_genres(State(state): State<AppState>) -> Json<GenresResponse> {
    Json(GenresResponse {
        genres: state.recommender.encoder().vocabulary().to_vec(),
    })
}

/// The size-bucket options, for the preferences form
pub async fn get_buckets() -> Json<BucketsResponse> {
    let buckets = SizeBucket::ALL
        .into_iter()
        .map(|key| {
            let (lo, hi) = key.bounds();
            BucketOption { key, lo, hi }
        })
        .collect();
    Json(BucketsResponse { buckets })
}

/// Starts a session from stated preferences
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    if request.genres.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one genre must be selected".to_string(),
        ));
    }

    let session = Session::new(UserPreferences::new(request.genres, request.size_bucket));
    let id = Uuid::new_v4();
    let response = SessionResponse::new(id, &session);

    let mut sessions = state.sessions.write().await;
    sessions.insert(id, session);

    tracing::info!(session_id = %id, "session created");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Session status
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
    Ok(Json(SessionResponse::new(id, session)))
}

/// Samples the current round's comparison pair
pub async fn get_pair(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PairResponse>> {
    let (prefs, round) = {
        let sessions = state.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        if session.rounds_complete() {
            return Err(AppError::Conflict(
                "all comparison rounds are complete".to_string(),
            ));
        }
        (session.prefs.clone(), session.round)
    };

    let previous = if round > 1 {
        prefs.last_reference()
    } else {
        None
    };
    let (first, second) = sample_pair(
        &state.catalog.broad,
        &prefs,
        previous,
        &mut rand::thread_rng(),
    )
    .map_err(|e| {
        tracing::warn!(session_id = %id, round, error = %e, "pair sampling failed");
        AppError::from(e)
    })?;

    Ok(Json(PairResponse {
        round,
        pair: vec![BookResponse::from(&first), BookResponse::from(&second)],
    }))
}

/// Records the current round's pick (or a skip) and advances the round
pub async fn post_choice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChoiceRequest>,
) -> AppResult<Json<SessionResponse>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
    if session.rounds_complete() {
        return Err(AppError::Conflict(
            "all comparison rounds are complete".to_string(),
        ));
    }

    if let Some(position) = request.position {
        let record = state
            .catalog
            .broad_record(position)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown book position {}", position)))?;
        session.prefs.add_reference(record);
    }
    session.round += 1;

    tracing::info!(
        session_id = %id,
        round = session.round,
        references = session.prefs.references.len(),
        "choice recorded"
    );
    Ok(Json(SessionResponse::new(id, session)))
}

/// Scores the niche catalog against the session's profile and returns the
/// top `limit` books
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RecommendQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let prefs = {
        let sessions = state.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        session.prefs.clone()
    };

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let top = state
        .recommender
        .recommend(&state.catalog.niche, &prefs, &WEIGHTS, limit);

    tracing::info!(
        session_id = %id,
        candidates = state.catalog.niche.len(),
        returned = top.len(),
        "recommendations computed"
    );
    Ok(Json(RecommendationsResponse {
        recommendations: top.iter().map(RecommendationEntry::from).collect(),
    }))
}
