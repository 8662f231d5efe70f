use std::sync::Arc;

use redb::{Database, ReadableTable};

use pantry_core::{Like, LikeStore, StorageError, LIKES_KEY};

use crate::tables::SLOTS_TABLE;

/// redb implementation of LikeStore.
///
/// The whole collection lives in one slot, so every save replaces it.
pub struct RedbLikeStore {
    db: Arc<Database>,
}

impl RedbLikeStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Initialize the database tables.
    pub fn init_tables(db: &Database) -> Result<(), StorageError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let _ = write_txn
                .open_table(SLOTS_TABLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }
}

impl LikeStore for RedbLikeStore {
    fn load_likes(&self) -> Result<Vec<Like>, StorageError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let table = read_txn
            .open_table(SLOTS_TABLE)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match table
            .get(LIKES_KEY)
            .map_err(|e| StorageError::Database(e.to_string()))?
        {
            Some(value) if !value.value().is_empty() => {
                let likes: Vec<Like> = serde_json::from_slice(value.value())
                    .map_err(|e| StorageError::Encoding(e.to_string()))?;
                Ok(likes)
            }
            _ => Ok(Vec::new()),
        }
    }

    fn save_likes(&self, likes: &[Like]) -> Result<(), StorageError> {
        let value =
            serde_json::to_vec(likes).map_err(|e| StorageError::Encoding(e.to_string()))?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(SLOTS_TABLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;

            table
                .insert(LIKES_KEY, value.as_slice())
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        write_txn
            .commit()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        tracing::debug!("Saved {} liked recipes", likes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_database;
    use pantry_core::Likes;
    use tempfile::tempdir;

    fn like(id: &str) -> Like {
        Like::new(id, format!("Recipe {}", id), "Test Kitchen", "http://img.test/x.jpg")
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = RedbLikeStore::new(init_database(dir.path().join("likes.redb")).unwrap());

        let likes = vec![like("2"), like("1")];
        store.save_likes(&likes).unwrap();

        assert_eq!(store.load_likes().unwrap(), likes);
    }

    #[test]
    fn test_save_replaces_collection() {
        let dir = tempdir().unwrap();
        let store = RedbLikeStore::new(init_database(dir.path().join("likes.redb")).unwrap());

        store.save_likes(&[like("1"), like("2")]).unwrap();
        store.save_likes(&[like("3")]).unwrap();

        assert_eq!(store.load_likes().unwrap(), vec![like("3")]);
    }

    #[test]
    fn test_likes_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("likes.redb");

        {
            let store = RedbLikeStore::new(init_database(&path).unwrap());
            let mut likes = Likes::new(Arc::new(store));
            likes.add_like("47746", "Pizza", "Jo", "img").unwrap();
            likes.add_like("35382", "Pasta", "Al", "img").unwrap();
            likes.delete_like("47746").unwrap();
        }

        let store = RedbLikeStore::new(init_database(&path).unwrap());
        let mut likes = Likes::new(Arc::new(store));
        likes.read_storage().unwrap();

        assert!(likes.is_liked("35382"));
        assert!(!likes.is_liked("47746"));
        assert_eq!(likes.num_likes(), 1);
    }

    #[test]
    fn test_corrupt_slot_is_an_error() {
        let dir = tempdir().unwrap();
        let db = init_database(dir.path().join("likes.redb")).unwrap();

        let write_txn = db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(SLOTS_TABLE).unwrap();
            table.insert(LIKES_KEY, b"not json".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        let store = RedbLikeStore::new(db);
        assert!(matches!(
            store.load_likes(),
            Err(StorageError::Encoding(_))
        ));
    }
}
