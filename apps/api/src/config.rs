use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    /// HS256 secret for signing session cookies.
    pub session_secret: String,
    /// Shared secret used to verify identity tokens minted by the auth provider.
    pub identity_token_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// Session cookies carry the `Secure` attribute only in production.
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            session_secret: require_env("SESSION_SECRET")?,
            identity_token_secret: require_env("IDENTITY_TOKEN_SECRET")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            production: std::env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
