//! Environment-based configuration.
//!
//! Everything has a default except the endpoint URL, which is optional at
//! load time: its absence only becomes an operator-facing notice when a
//! command actually needs the network.

use std::path::PathBuf;

use thiserror::Error;

/// Operator configuration, sourced from env vars (plus `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote record-keeping endpoint. The URL doubles as the shared secret;
    /// there is no other authentication.
    pub endpoint_url: Option<String>,
    /// Path of the persisted candidate cache.
    pub cache_path: PathBuf,
    /// Proximity-matching threshold in meters. Observed in the field as 5
    /// and 10; tuned per deployment rather than hardcoded.
    pub match_radius_m: f64,
    /// Request timeout for all endpoint calls.
    pub http_timeout_secs: u64,
    /// Submitter identity sent with each upload.
    pub nickname: String,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load configuration from the process environment, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from env vars already in the process (no `.env`).
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse.
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration through the provided env-var lookup, so tests can use
/// a plain map instead of mutating the process environment.
fn build_config<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let match_radius_m = parse_f64("WAYMARK_MATCH_RADIUS_M", "10")?;
    if !match_radius_m.is_finite() || match_radius_m < 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WAYMARK_MATCH_RADIUS_M".to_string(),
            reason: format!("must be a non-negative finite number, got {match_radius_m}"),
        });
    }

    Ok(Config {
        endpoint_url: lookup("WAYMARK_ENDPOINT_URL").ok().filter(|s| !s.is_empty()),
        cache_path: PathBuf::from(or_default("WAYMARK_CACHE_PATH", "./waymark-cache.json")),
        match_radius_m,
        http_timeout_secs: parse_u64("WAYMARK_HTTP_TIMEOUT_SECS", "30")?,
        nickname: or_default("WAYMARK_NICKNAME", "lightship"),
        log_level: or_default("WAYMARK_LOG_LEVEL", "info"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_yields_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.endpoint_url.is_none());
        assert_eq!(cfg.cache_path, PathBuf::from("./waymark-cache.json"));
        assert!((cfg.match_radius_m - 10.0).abs() < f64::EPSILON);
        assert_eq!(cfg.http_timeout_secs, 30);
        assert_eq!(cfg.nickname, "lightship");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn endpoint_url_is_picked_up() {
        let mut map = HashMap::new();
        map.insert("WAYMARK_ENDPOINT_URL", "https://script.example/exec");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.endpoint_url.as_deref(), Some("https://script.example/exec"));
    }

    #[test]
    fn empty_endpoint_url_counts_as_unset() {
        let mut map = HashMap::new();
        map.insert("WAYMARK_ENDPOINT_URL", "");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.endpoint_url.is_none());
    }

    #[test]
    fn match_radius_override() {
        let mut map = HashMap::new();
        map.insert("WAYMARK_MATCH_RADIUS_M", "5");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.match_radius_m - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn match_radius_rejects_garbage() {
        let mut map = HashMap::new();
        map.insert("WAYMARK_MATCH_RADIUS_M", "ten meters");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYMARK_MATCH_RADIUS_M"),
            "expected InvalidEnvVar(WAYMARK_MATCH_RADIUS_M), got: {result:?}"
        );
    }

    #[test]
    fn match_radius_rejects_negative() {
        let mut map = HashMap::new();
        map.insert("WAYMARK_MATCH_RADIUS_M", "-3");
        assert!(build_config(lookup_from_map(&map)).is_err());
    }

    #[test]
    fn timeout_rejects_garbage() {
        let mut map = HashMap::new();
        map.insert("WAYMARK_HTTP_TIMEOUT_SECS", "soon");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYMARK_HTTP_TIMEOUT_SECS"),
            "expected InvalidEnvVar(WAYMARK_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
