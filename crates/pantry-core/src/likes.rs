use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::LikeStore;

/// A bookmarked recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
}

impl Like {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            image: image.into(),
        }
    }
}

/// Ordered, id-unique collection of liked recipes.
///
/// Every successful mutation writes the whole collection to the store. A
/// failed write rolls the mutation back so memory and storage agree.
pub struct Likes {
    likes: Vec<Like>,
    store: Arc<dyn LikeStore>,
}

impl Likes {
    /// An empty collection backed by `store`. Call [`Likes::read_storage`] to restore.
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self {
            likes: Vec::new(),
            store,
        }
    }

    /// Add a like. Returns `None` without writing if the id is already liked.
    pub fn add_like(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        image: &str,
    ) -> Result<Option<Like>, StorageError> {
        if self.is_liked(id) {
            tracing::debug!("Recipe {} already liked", id);
            return Ok(None);
        }

        let like = Like::new(id, title, author, image);
        self.likes.push(like.clone());
        if let Err(e) = self.persist() {
            self.likes.pop();
            return Err(e);
        }
        Ok(Some(like))
    }

    /// Remove a like. Returns false without writing if the id is not liked.
    pub fn delete_like(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(index) = self.likes.iter().position(|l| l.id == id) else {
            tracing::debug!("Recipe {} not liked, nothing to delete", id);
            return Ok(false);
        };

        let removed = self.likes.remove(index);
        if let Err(e) = self.persist() {
            self.likes.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|l| l.id == id)
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    /// Write the whole collection to the store.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.store.save_likes(&self.likes)
    }

    /// Replace the collection with what the store holds.
    /// Repeated ids in storage keep their first occurrence.
    pub fn read_storage(&mut self) -> Result<(), StorageError> {
        let stored = self.store.load_likes()?;
        let mut seen = HashSet::new();
        self.likes = stored
            .into_iter()
            .filter(|like| seen.insert(like.id.clone()))
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryLikeStore;

    fn likes_with(store: &Arc<InMemoryLikeStore>) -> Likes {
        Likes::new(store.clone())
    }

    #[test]
    fn test_add_like_persists() {
        let store = Arc::new(InMemoryLikeStore::new());
        let mut likes = likes_with(&store);

        let like = likes.add_like("1", "Pizza", "Jo", "img").unwrap().unwrap();

        assert_eq!(like.id, "1");
        assert!(likes.is_liked("1"));
        assert_eq!(likes.num_likes(), 1);
        assert_eq!(store.stored(), vec![like]);
    }

    #[test]
    fn test_duplicate_like_ignored() {
        let store = Arc::new(InMemoryLikeStore::new());
        let mut likes = likes_with(&store);

        likes.add_like("1", "Pizza", "Jo", "img").unwrap();
        let second = likes.add_like("1", "Pizza", "Jo", "img").unwrap();

        assert!(second.is_none());
        assert_eq!(likes.num_likes(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_delete_like() {
        let store = Arc::new(InMemoryLikeStore::new());
        let mut likes = likes_with(&store);
        likes.add_like("1", "Pizza", "Jo", "img").unwrap();
        likes.add_like("2", "Pasta", "Al", "img").unwrap();

        assert!(likes.delete_like("1").unwrap());

        assert!(!likes.is_liked("1"));
        assert!(likes.is_liked("2"));
        assert_eq!(store.stored().len(), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let store = Arc::new(InMemoryLikeStore::new());
        let mut likes = likes_with(&store);

        assert!(!likes.delete_like("nope").unwrap());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_read_storage_empty() {
        let store = Arc::new(InMemoryLikeStore::new());
        let mut likes = likes_with(&store);

        likes.read_storage().unwrap();

        assert_eq!(likes.num_likes(), 0);
    }

    #[test]
    fn test_read_storage_restores_order_and_dedups() {
        let store = Arc::new(InMemoryLikeStore::with_likes(vec![
            Like::new("2", "Pasta", "Al", "img"),
            Like::new("1", "Pizza", "Jo", "img"),
            Like::new("2", "Pasta again", "Al", "img"),
        ]));
        let mut likes = likes_with(&store);

        likes.read_storage().unwrap();

        let ids: Vec<&str> = likes.likes().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(likes.likes()[0].title, "Pasta");
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let store = Arc::new(InMemoryLikeStore::new());
        let mut likes = likes_with(&store);
        likes.add_like("1", "Pizza", "Jo", "img").unwrap();

        store.set_fail_writes(true);
        assert!(likes.add_like("2", "Pasta", "Al", "img").is_err());
        assert!(likes.delete_like("1").is_err());

        assert!(likes.is_liked("1"));
        assert!(!likes.is_liked("2"));
        assert_eq!(likes.num_likes(), 1);
    }
}
