//! Translation gateway module.
//!
//! [`TranslationGateway`] is the external collaborator that turns
//! `(text, source, target)` into translated text.  Two implementations ship:
//!
//! * [`MockGateway`] — the offline placeholder backend (fixed delay, phrase
//!   substitution for a few known pairs).  Default.
//! * [`HttpGateway`] — POSTs to a LibreTranslate-style `/translate`
//!   endpoint; all connection details come from [`GatewayConfig`].
//!
//! # Contract
//!
//! When `source_language == target_language` every implementation returns
//! the input text unchanged — callers never special-case same-language
//! requests.

pub mod http;
pub mod mock;

pub use http::HttpGateway;
pub use mock::MockGateway;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{GatewayConfig, GatewayProvider};

// ---------------------------------------------------------------------------
// Request / response value objects
// ---------------------------------------------------------------------------

/// A translation request — a value object with no identity beyond its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// The result of one translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationResponse {
    /// Identity response: text passed through unchanged.
    fn passthrough(request: &TranslationRequest) -> Self {
        Self {
            translated_text: request.text.clone(),
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// GatewayError
// ---------------------------------------------------------------------------

/// Errors raised by a translation gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport or connection error.
    #[error("translation request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The response could not be parsed as expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The service returned a response with no usable text.
    #[error("translation service returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// TranslationGateway trait
// ---------------------------------------------------------------------------

/// Async interface to a translation backend.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn TranslationGateway>` between the orchestrator and its spawned
/// completion tasks.
#[async_trait]
pub trait TranslationGateway: Send + Sync {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, GatewayError>;
}

/// Build the gateway selected by configuration.
pub fn from_config(config: &GatewayConfig) -> Arc<dyn TranslationGateway> {
    match config.provider {
        GatewayProvider::Mock => Arc::new(MockGateway::new(std::time::Duration::from_millis(
            config.mock_delay_ms,
        ))),
        GatewayProvider::Http => Arc::new(HttpGateway::from_config(config)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    #[test]
    fn from_config_selects_mock_by_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.provider, GatewayProvider::Mock);
        let _gateway = from_config(&config);
    }

    #[test]
    fn from_config_builds_http_gateway() {
        let config = GatewayConfig {
            provider: GatewayProvider::Http,
            ..GatewayConfig::default()
        };
        let _gateway = from_config(&config);
    }

    #[test]
    fn gateway_error_display_is_user_presentable() {
        assert!(GatewayError::Timeout.to_string().contains("timed out"));
        assert!(GatewayError::EmptyResponse.to_string().contains("empty"));
    }
}
