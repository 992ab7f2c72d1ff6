use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Blog API error: {0}")]
    BlogApi(#[from] BlogApiError),

    #[error("Preference error: {0}")]
    Preference(#[from] PreferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug)]
pub enum BlogApiError {
    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    #[error("Preference file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Preference file serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
