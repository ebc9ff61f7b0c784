//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Prediction endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/predict";

/// Multipart field the server reads the image from.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Errors from loading a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field had an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for talking to the prediction service and showing notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the prediction endpoint.
    pub endpoint: String,
    /// Multipart field name for the image.
    pub upload_field: String,
    /// How long notices stay on screen, in milliseconds.
    pub notice_ttl_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            upload_field: DEFAULT_UPLOAD_FIELD.to_owned(),
            notice_ttl_ms: 2000,
        }
    }
}

impl ClientConfig {
    /// Config fixed at build time.
    ///
    /// `FRUITLENS_CONFIG` may hold a JSON config and `FRUITLENS_ENDPOINT`
    /// an endpoint URL; both are read when the crate is compiled. An
    /// unusable JSON config is logged and replaced by the defaults.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("FRUITLENS_CONFIG"), option_env!("FRUITLENS_ENDPOINT"))
    }

    /// Combine an optional JSON config with an optional endpoint override.
    ///
    /// Blank inputs are ignored. The endpoint override wins over the
    /// endpoint in the JSON.
    #[must_use]
    pub fn resolve(json: Option<&str>, endpoint: Option<&str>) -> Self {
        let mut config = match json.map(str::trim).filter(|j| !j.is_empty()) {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring build-time config");
                Self::default()
            }),
            None => Self::default(),
        };
        if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            endpoint.clone_into(&mut config.endpoint);
        }
        config
    }

    /// Parse from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and
    /// [`ConfigError::Invalid`] for an empty endpoint or field name.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.upload_field.trim().is_empty() {
            return Err(ConfigError::Invalid("upload_field must not be empty".into()));
        }
        Ok(())
    }

    /// Notice lifetime as a [`Duration`].
    #[must_use]
    pub const fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_server() {
        let c = ClientConfig::default();
        assert_eq!(c.endpoint, "http://127.0.0.1:5000/api/predict");
        assert_eq!(c.upload_field, "file");
        assert_eq!(c.notice_ttl(), Duration::from_secs(2));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = ClientConfig::from_json(r#"{"endpoint":"https://example.test/predict"}"#).unwrap();
        assert_eq!(c.endpoint, "https://example.test/predict");
        assert_eq!(c.upload_field, "file");
    }

    #[test]
    fn resolve_layers_json_then_endpoint() {
        let json = r#"{"upload_field":"image","notice_ttl_ms":500}"#;
        let c = ClientConfig::resolve(Some(json), Some(" https://fruit.test/api "));
        assert_eq!(c.endpoint, "https://fruit.test/api");
        assert_eq!(c.upload_field, "image");
        assert_eq!(c.notice_ttl(), Duration::from_millis(500));

        assert_eq!(ClientConfig::resolve(None, Some("  ")), ClientConfig::default());
    }

    #[test]
    fn resolve_falls_back_on_bad_json() {
        let c = ClientConfig::resolve(Some(r#"{"upload_field":""}"#), None);
        assert_eq!(c, ClientConfig::default());
        let c = ClientConfig::resolve(Some("not json"), Some("http://h/p"));
        assert_eq!(c.endpoint, "http://h/p");
        assert_eq!(c.upload_field, "file");
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        assert!(matches!(
            ClientConfig::from_json(r#"{"endpoint":"  "}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
