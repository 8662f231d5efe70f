//! Pantry DB - redb implementation of storage traits.

pub mod like_store;
pub mod tables;

pub use like_store::RedbLikeStore;

use std::path::Path;
use std::sync::Arc;

use redb::Database;

use pantry_core::StorageError;

/// Open (or create) a database with all required tables.
pub fn init_database(path: impl AsRef<Path>) -> Result<Arc<Database>, StorageError> {
    let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

    RedbLikeStore::init_tables(&db)?;

    Ok(Arc::new(db))
}
