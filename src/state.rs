use std::sync::Arc;

use crate::{
    auth::repo::{AccountRepo, PgAccountRepo},
    config::AppConfig,
    db,
    favorites::repo::{FavoriteRepo, PgFavoriteRepo},
    recipes::repo::{PgRecipeRepo, RecipeRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountRepo>,
    pub recipes: Arc<dyn RecipeRepo>,
    pub favorites: Arc<dyn FavoriteRepo>,
}

impl AppState {
    /// Reads config from the environment, connects to Postgres and applies migrations.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await;

        Ok(Self {
            config,
            accounts: Arc::new(PgAccountRepo::new(pool.clone())),
            recipes: Arc::new(PgRecipeRepo::new(pool.clone())),
            favorites: Arc::new(PgFavoriteRepo::new(pool)),
        })
    }

    /// State backed by a single in-memory store, for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        let store = Arc::new(crate::memory::MemoryStore::default());
        Self {
            config: Arc::new(AppConfig::for_tests()),
            accounts: store.clone(),
            recipes: store.clone(),
            favorites: store,
        }
    }
}
