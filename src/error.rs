use thiserror::Error;

/// Errors raised by the fetch, snapshot, report, and store layers.
#[derive(Debug, Error)]
pub enum ExoplanetError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Source {url} answered with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Field '{0}' is missing from the source schema")]
    MissingField(String),

    #[error("Invalid value '{value}' in field '{field}' for planet '{planet}'")]
    InvalidValue {
        field: String,
        planet: String,
        value: String,
    },

    #[error("Unknown report category '{0}'")]
    UnknownCategory(String),

    #[error("No database at {0}; run `load` or `refresh` first")]
    StoreNotFound(String),

    #[error("Unknown sort order '{0}'")]
    UnknownOrder(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExoplanetError>;

impl ExoplanetError {
    pub fn invalid_value(field: &str, planet: &str, value: &str) -> Self {
        ExoplanetError::InvalidValue {
            field: field.to_string(),
            planet: planet.to_string(),
            value: value.to_string(),
        }
    }
}
