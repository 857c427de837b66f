use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    auth::jwt::JwtKeys,
    config::AppConfig,
    db,
    users::repo::{PgUserStore, UserStore},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(
            PgUserStore::boxed(pool),
            JwtKeys::from_config(&config.jwt),
        ))
    }

    pub fn from_parts(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    #[cfg(test)]
    pub fn fake() -> (Self, crate::users::memory::MemoryUserStore) {
        let store = crate::users::memory::MemoryUserStore::new();
        let keys = JwtKeys::new("test-secret", time::Duration::days(7));
        (Self::from_parts(Arc::new(store.clone()), keys), store)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}
