use crate::error::ConfigError;
use std::env;

pub const DEFAULT_LINEAR_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Credentials and endpoints for both systems, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub linear_endpoint: String,
    pub linear_api_key: String,
    pub space_endpoint: String,
    pub space_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };

        Ok(Self {
            linear_endpoint: lookup("LINEAR_ENDPOINT")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LINEAR_ENDPOINT.to_string()),
            linear_api_key: required("LINEAR_API_KEY")?,
            space_endpoint: required("JETBRAINS_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            space_key: required("JETBRAINS_KEY")?,
        })
    }
}
