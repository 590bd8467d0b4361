//! Local SQLite database operations.

pub mod clock;
pub mod date_utils;
pub mod error;
pub mod repository;
pub mod schema;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::DbError;
pub use repository::{
    ActivityRepository, CardRepository, CollectionRepository, ImportRepository,
    PreferenceRepository, SqliteRepository,
};
