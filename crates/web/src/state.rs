use axum::extract::FromRef;
use storage::Database;

use crate::config::Config;
use crate::features::auth::security::TokenService;

/// Everything handlers and middleware share, built once in `main`
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            tokens: TokenService::new(
                &config.jwt_secret,
                config.jwt_algorithm,
                config.token_ttl_minutes,
            ),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
