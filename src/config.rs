//! Application configuration loaded from environment variables (`.env` is honoured by the
//! binary through `dotenvy`).

use crate::model::Coordinate;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://yumpdum-backend.vercel.app";
pub const DEFAULT_ONBOARDING_FILE: &str = ".yumpdum/onboarding.json";
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate::new(28.6304, 77.2177);
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: Url,
    /// `None` means requests may hang; recovery is a user-initiated retry.
    pub request_timeout: Option<Duration>,
    pub onboarding_state_path: PathBuf,
    pub map_center: Coordinate,
    pub channel_buffer: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = match get("YUMPDUM_API_BASE_URL") {
            Some(raw) => parse_base_url("YUMPDUM_API_BASE_URL", &raw)?,
            None => parse_base_url("YUMPDUM_API_BASE_URL", DEFAULT_API_BASE_URL)?,
        };

        let request_timeout = get("YUMPDUM_API_TIMEOUT_SECS")
            .map(|raw| match raw.parse::<u64>() {
                Ok(0) => Err(ConfigError::invalid(
                    "YUMPDUM_API_TIMEOUT_SECS",
                    &raw,
                    "must be positive",
                )),
                Ok(secs) => Ok(Duration::from_secs(secs)),
                Err(e) => Err(ConfigError::invalid("YUMPDUM_API_TIMEOUT_SECS", &raw, e)),
            })
            .transpose()?;

        let onboarding_state_path = get("YUMPDUM_ONBOARDING_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ONBOARDING_FILE));

        let map_center = get("YUMPDUM_MAP_CENTER")
            .map(|raw| parse_coordinate("YUMPDUM_MAP_CENTER", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_MAP_CENTER);

        let channel_buffer = match get("YUMPDUM_CHANNEL_BUFFER") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::invalid(
                        "YUMPDUM_CHANNEL_BUFFER",
                        &raw,
                        "must be positive",
                    ))
                }
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("YUMPDUM_CHANNEL_BUFFER", &raw, e)),
            },
            None => DEFAULT_CHANNEL_BUFFER,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            onboarding_state_path,
            map_center,
            channel_buffer,
        })
    }
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid(key, raw, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(key, raw, "scheme must be http or https"));
    }
    Ok(url)
}

fn parse_coordinate(key: &'static str, raw: &str) -> Result<Coordinate, ConfigError> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| ConfigError::invalid(key, raw, "expected `lat,lng`"))?;
    let latitude = lat.trim().parse::<f64>().map_err(|e| ConfigError::invalid(key, raw, e))?;
    let longitude = lng.trim().parse::<f64>().map_err(|e| ConfigError::invalid(key, raw, e))?;
    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        return Err(ConfigError::invalid(key, raw, "out of range"));
    }
    Ok(coordinate)
}
