use crate::error::StorageError;
use crate::likes::Like;

/// Name of the slot holding the liked recipes.
pub const LIKES_KEY: &str = "likes";

/// Durable storage for the liked-recipes collection.
///
/// The collection is always read and written as a whole.
pub trait LikeStore: Send + Sync {
    /// Read the persisted collection. An empty or missing slot yields an empty vector.
    fn load_likes(&self) -> Result<Vec<Like>, StorageError>;

    /// Replace the persisted collection.
    fn save_likes(&self, likes: &[Like]) -> Result<(), StorageError>;
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// In-memory like store for testing.
    #[derive(Default)]
    pub struct InMemoryLikeStore {
        likes: RwLock<Option<Vec<Like>>>,
        saves: AtomicUsize,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
    }

    impl InMemoryLikeStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store that already holds `likes`.
        pub fn with_likes(likes: Vec<Like>) -> Self {
            Self {
                likes: RwLock::new(Some(likes)),
                ..Self::default()
            }
        }

        /// Number of successful saves so far.
        pub fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        /// Make every following save fail.
        pub fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Make every following load fail.
        pub fn set_fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// What a fresh reader would see.
        pub fn stored(&self) -> Vec<Like> {
            self.likes.read().unwrap().clone().unwrap_or_default()
        }
    }

    impl LikeStore for InMemoryLikeStore {
        fn load_likes(&self) -> Result<Vec<Like>, StorageError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Database("read rejected".to_string()));
            }
            Ok(self.stored())
        }

        fn save_likes(&self, likes: &[Like]) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Database("write rejected".to_string()));
            }
            *self.likes.write().unwrap() = Some(likes.to_vec());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

}
