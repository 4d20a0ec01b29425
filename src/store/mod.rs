//! Movie store module
//!
//! In-memory, insertion-ordered collection of movie records shared by all
//! connections. Every operation takes the same async mutex, so list, create
//! and delete each see a consistent snapshot.

mod movie;

pub use movie::{decode_first, Movie};

use crate::config::IdStrategy;
use tokio::sync::Mutex;

struct Inner {
    movies: Vec<Movie>,
    /// Number of records ever inserted, including deleted ones
    inserted: i64,
}

/// Ordered movie collection
pub struct MovieStore {
    inner: Mutex<Inner>,
    id_strategy: IdStrategy,
}

impl MovieStore {
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            inner: Mutex::new(Inner {
                movies: Vec::new(),
                inserted: 0,
            }),
            id_strategy,
        }
    }

    /// Snapshot of all records in insertion order
    pub async fn list(&self) -> Vec<Movie> {
        self.inner.lock().await.movies.clone()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.lock().await.movies.len()
    }

    /// Append a record, overwriting any client-supplied id.
    ///
    /// Returns the stored record with its assigned id.
    pub async fn create(&self, mut movie: Movie) -> Movie {
        let mut inner = self.inner.lock().await;
        movie.id = match self.id_strategy {
            IdStrategy::Length => i64::try_from(inner.movies.len()).unwrap_or(i64::MAX) + 1,
            IdStrategy::Sequence => inner.inserted + 1,
        };
        inner.inserted += 1;
        inner.movies.push(movie.clone());
        movie
    }

    /// Remove the first record with `id`, keeping the order of the rest.
    ///
    /// Returns `None` when no record matches.
    pub async fn delete(&self, id: i64) -> Option<Movie> {
        let mut inner = self.inner.lock().await;
        let index = inner.movies.iter().position(|m| m.id == id)?;
        Some(inner.movies.remove(index))
    }
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = MovieStore::default();
        assert!(store.list().await.is_empty());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_assigns_ids_in_order() {
        let store = MovieStore::default();
        let first = store.create(Movie::new("The Godfather", 1972)).await;
        let second = store.create(Movie::new("Heat", 1995)).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let titles: Vec<_> = store.list().await.into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["The Godfather", "Heat"]);
    }

    #[tokio::test]
    async fn test_create_overwrites_client_id() {
        let store = MovieStore::default();
        let mut movie = Movie::new("Heat", 1995);
        movie.id = 99;
        assert_eq!(store.create(movie).await.id, 1);
    }

    #[tokio::test]
    async fn test_delete_preserves_order() {
        let store = MovieStore::default();
        for title in ["A", "B", "C"] {
            store.create(Movie::new(title, 2000)).await;
        }

        let removed = store.delete(2).await.unwrap();
        assert_eq!(removed.title, "B");

        let remaining: Vec<_> = store.list().await.into_iter().map(|m| (m.id, m.title)).collect();
        assert_eq!(remaining, vec![(1, "A".to_string()), (3, "C".to_string())]);
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_store_untouched() {
        let store = MovieStore::default();
        store.create(Movie::new("A", 2000)).await;
        assert!(store.delete(7).await.is_none());
        assert!(store.delete(-1).await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_length_strategy_reuses_ids_after_delete() {
        let store = MovieStore::new(IdStrategy::Length);
        store.create(Movie::new("A", 2000)).await;
        store.create(Movie::new("B", 2001)).await;
        store.delete(1).await;

        // size is 1, so the next id collides with "B"
        let c = store.create(Movie::new("C", 2002)).await;
        assert_eq!(c.id, 2);

        // first match wins
        assert_eq!(store.delete(2).await.unwrap().title, "B");
        assert_eq!(store.delete(2).await.unwrap().title, "C");
        assert!(store.delete(2).await.is_none());
    }

    #[tokio::test]
    async fn test_sequence_strategy_never_reuses_ids() {
        let store = MovieStore::new(IdStrategy::Sequence);
        store.create(Movie::new("A", 2000)).await;
        store.create(Movie::new("B", 2001)).await;
        store.delete(1).await;

        let c = store.create(Movie::new("C", 2002)).await;
        assert_eq!(c.id, 3);

        let ids: Vec<_> = store.list().await.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = std::sync::Arc::new(MovieStore::default());
        let mut tasks = Vec::new();
        for i in 0..50 {
            let store = std::sync::Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store.create(Movie::new(format!("m{i}"), 2000)).await.id
            }));
        }

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
    }
}
