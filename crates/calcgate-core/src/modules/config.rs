use std::fs;
use std::path::Path;

use calcgate_types::error::ConfigError;
use calcgate_types::models::GatewayConfig;

pub const ENV_ALLOWED_ORIGINS: &str = "CALCGATE_ALLOWED_ORIGINS";
pub const ENV_TEXT_API_KEY: &str = "CALCGATE_TEXT_API_KEY";
pub const ENV_MEDIA_TOKEN: &str = "CALCGATE_MEDIA_TOKEN";
pub const ENV_FORM_ACCESS_KEY: &str = "CALCGATE_FORM_ACCESS_KEY";
pub const ENV_TEXT_BASE_URL: &str = "CALCGATE_TEXT_BASE_URL";
pub const ENV_IMAGE_BASE_URL: &str = "CALCGATE_IMAGE_BASE_URL";
pub const ENV_VIDEO_BASE_URL: &str = "CALCGATE_VIDEO_BASE_URL";
pub const ENV_FEEDBACK_ENDPOINT: &str = "CALCGATE_FEEDBACK_ENDPOINT";

/// Load the gateway configuration.
///
/// Without a path the built-in defaults are used. The process environment is
/// layered on top and the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.check()?;

    tracing::debug!(
        "Loaded config: {} allowed origins, {} text models",
        config.allowed_origins.len(),
        config.text.models.len()
    );
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(path, &e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))
}

/// Overlay environment values onto `config`. Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(origins) = get(ENV_ALLOWED_ORIGINS) {
        config.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(key) = get(ENV_TEXT_API_KEY) {
        config.text.api_key = Some(key);
    }
    if let Some(token) = get(ENV_MEDIA_TOKEN) {
        config.image.token = Some(token.clone());
        config.video.token = Some(token);
    }
    if let Some(key) = get(ENV_FORM_ACCESS_KEY) {
        config.feedback.access_key = Some(key);
    }
    if let Some(url) = get(ENV_TEXT_BASE_URL) {
        config.text.base_url = url;
    }
    if let Some(url) = get(ENV_IMAGE_BASE_URL) {
        config.image.base_url = url;
    }
    if let Some(url) = get(ENV_VIDEO_BASE_URL) {
        config.video.base_url = url;
    }
    if let Some(url) = get(ENV_FEEDBACK_ENDPOINT) {
        config.feedback.endpoint = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = read_config_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"allowed_origins": ["https://calc.example.com"]}"#).unwrap();
        let config = read_config_file(file.path()).unwrap();
        assert_eq!(config.allowed_origins, vec!["https://calc.example.com".to_string()]);
        assert_eq!(config.rate_limits, GatewayConfig::default().rate_limits);
        assert!(!config.text.models.is_empty());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"rate_limits": {"text": {"max_requests": 0, "window_secs": 60}}}"#)
            .unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert!(field.starts_with("rate_limits"), "unexpected field {field}");
            },
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides_credentials_and_origins() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_ALLOWED_ORIGINS, " https://a.example , ,https://b.example "),
                (ENV_TEXT_API_KEY, "sk-test"),
                (ENV_MEDIA_TOKEN, "media-token"),
                (ENV_FORM_ACCESS_KEY, "form-key"),
                (ENV_IMAGE_BASE_URL, "http://127.0.0.1:9000"),
            ]),
        );

        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.text.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.image.token.as_deref(), Some("media-token"));
        assert_eq!(config.video.token.as_deref(), Some("media-token"));
        assert_eq!(config.feedback.access_key.as_deref(), Some("form-key"));
        assert_eq!(config.image.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.video.base_url, GatewayConfig::default().video.base_url);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[(ENV_TEXT_API_KEY, "   "), (ENV_ALLOWED_ORIGINS, "")]),
        );
        assert!(config.text.api_key.is_none());
        assert_eq!(config.allowed_origins, GatewayConfig::default().allowed_origins);
    }
}
