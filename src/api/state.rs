use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::models::UserPreferences;
use crate::services::Recommender;

/// Number of comparison rounds per session
pub const TOTAL_ROUNDS: u8 = 3;

/// One user's in-flight recommendation session
#[derive(Debug, Clone)]
pub struct Session {
    pub prefs: UserPreferences,
    /// The next comparison round, 1-based; past `TOTAL_ROUNDS` means done
    pub round: u8,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(prefs: UserPreferences) -> Self {
        Self {
            prefs,
            round: 1,
            created_at: Utc::now(),
        }
    }

    pub fn rounds_complete(&self) -> bool {
        self.round > TOTAL_ROUNDS
    }
}

/// Shared application state
///
/// The catalog and fitted recommender are immutable after startup; only the
/// session map is written after that, and each request touches only its own
/// session's entry.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub recommender: Arc<Recommender>,
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl AppState {
    /// Fits the engine from the broad catalog and wraps everything for sharing
    pub fn new(catalog: CatalogStore) -> Self {
        let recommender = Recommender::fit(&catalog.broad);
        Self {
            catalog: Arc::new(catalog),
            recommender: Arc::new(recommender),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
