use std::env;

/// Server configuration, read from the environment after `.env` loading.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origin; `*` allows any origin.
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/statescope.db".to_string());
        let cors_allowed_origin =
            env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string());

        Config {
            port,
            database_url,
            cors_allowed_origin,
        }
    }
}
