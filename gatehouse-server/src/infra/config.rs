use anyhow::Context;
use std::env;

/// Server configuration loaded from environment variables (and a `.env` file
/// when present).
///
/// `DATABASE_URL` and `TOKEN_SECRET` are hard requirements: without a store
/// and a signing secret nothing can run, so their absence fails startup
/// instead of being papered over with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Credential store settings
    pub database_url: String,

    // Session token signing secret
    pub token_secret: String,

    // Server-side pepper mixed into password hashes
    pub auth_password_pepper: String,

    // CORS settings
    pub cors_allowed_origins: Vec<String>,

    // Development settings; gates the cookie `Secure` attribute
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,

            token_secret: env::var("TOKEN_SECRET").context("TOKEN_SECRET must be set")?,

            auth_password_pepper: env::var("AUTH_PASSWORD_PEPPER")
                .unwrap_or_else(|_| "change-me-password-pepper".to_string()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),

            dev_mode: env::var("DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        !self.dev_mode
    }
}
