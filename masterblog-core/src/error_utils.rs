use crate::error::*;
use tracing::{error, warn};

/// Logging helpers shared by every operation boundary. Failures in this
/// client are never surfaced to the user, only written to the log.
pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("[{}] {}", self.error_code(), self);
        match self {
            CoreError::BlogApi(e) => {
                error!("Blog API error details: {:?}", e);
            }
            CoreError::Preference(e) => {
                error!("Preference error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("[{}] {}", self.error_code(), self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::BlogApi(_) => "BLOG_API".to_string(),
            CoreError::Preference(_) => "PREFERENCE".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for BlogApiError {
    fn log_error(&self) -> &Self {
        error!("BlogApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("BlogApiError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            BlogApiError::InvalidResponse { .. } => "BLOG_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for PreferenceError {
    fn log_error(&self) -> &Self {
        error!("PreferenceError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("PreferenceError (warning): {}", self);
        self
    }

    fn error_code(&self) -> String {
        match self {
            PreferenceError::NoConfigDir => "PREF_NO_CONFIG_DIR".to_string(),
            PreferenceError::Parse(_) => "PREF_PARSE_ERROR".to_string(),
            PreferenceError::Serialize(_) => "PREF_SERIALIZE_ERROR".to_string(),
        }
    }
}
