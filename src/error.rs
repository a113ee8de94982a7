use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("Response is missing {0}")]
    MissingData(&'static str),
}

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Could not set up client: {0}")]
    Client(ClientError),
    #[error("Source request failed: {0}")]
    Source(ClientError),
    #[error("Status '{status}' of issue '{issue}' not found on target project")]
    StatusNotFound { status: String, issue: String },
}
