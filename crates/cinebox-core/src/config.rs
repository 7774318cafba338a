//! Configuration module
//!
//! Cinebox is configured entirely through the environment (with `.env`
//! support): the admin credentials the login gate compares against, the base
//! URL of the movies API, and optionally where the session state file lives.
//!
//! The credentials are compared in the client itself. This is a convenience
//! gate for a single-admin tool, not a security boundary; real access
//! control belongs on the server side.

use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:4000";
const SESSION_FILE_NAME: &str = "session.json";

/// Application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub admin_username: String,
    pub admin_password: String,
    pub api_base_url: String,
    pub session_file_override: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            admin_username: env::var("CINEBOX_ADMIN_USERNAME")
                .or_else(|_| env::var("ADMIN_USERNAME"))
                .map_err(|_| {
                    anyhow::anyhow!("CINEBOX_ADMIN_USERNAME or ADMIN_USERNAME must be set")
                })?,
            admin_password: env::var("CINEBOX_ADMIN_PASSWORD")
                .or_else(|_| env::var("ADMIN_PASSWORD"))
                .map_err(|_| {
                    anyhow::anyhow!("CINEBOX_ADMIN_PASSWORD or ADMIN_PASSWORD must be set")
                })?,
            api_base_url: env::var("CINEBOX_API_URL")
                .or_else(|_| env::var("API_URL"))
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            session_file_override: env::var("CINEBOX_SESSION_FILE").ok().map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.admin_username.is_empty() {
            return Err(anyhow::anyhow!("Admin username cannot be empty"));
        }
        if self.admin_password.is_empty() {
            return Err(anyhow::anyhow!("Admin password cannot be empty"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "API base URL must be an http:// or https:// URL"
            ));
        }
        Ok(())
    }

    /// Path of the persisted session state file: the configured override, or
    /// `<user data dir>/cinebox/session.json`.
    pub fn session_file(&self) -> PathBuf {
        self.session_file_override
            .clone()
            .unwrap_or_else(default_session_file)
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("cinebox").join(SESSION_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME))
}
