mod book;
mod user_preferences;

pub use book::{BookRecord, SizeBucket};
pub use user_preferences::{ReferencePick, UserPreferences};
