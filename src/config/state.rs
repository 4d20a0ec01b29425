// Application state module
// Holds configuration and the movie store shared by all connections

use super::types::Config;
use crate::store::MovieStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: MovieStore,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: MovieStore::new(config.store.id_strategy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStrategy;
    use crate::store::Movie;

    #[tokio::test]
    async fn test_new_uses_configured_id_strategy() {
        let mut cfg = Config::load_from("does-not-exist/movies").unwrap();
        cfg.store.id_strategy = IdStrategy::Sequence;
        let state = AppState::new(&cfg);

        state.store.create(Movie::new("A", 2000)).await;
        state.store.delete(1).await;
        assert_eq!(state.store.create(Movie::new("B", 2001)).await.id, 2);
    }
}
