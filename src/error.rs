//! Error types for bookadmin

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session expired or unauthorized, please log in again")]
    Unauthorized,

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Not logged in. Run 'bookadmin login' first.")]
    NotLoggedIn,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Navigation to '{0}' did not settle")]
    RedirectLoop(String),

    #[error("Config file not found. Run 'bookadmin init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
