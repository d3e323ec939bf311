//! HTTP translation backend.
//!
//! Speaks the LibreTranslate wire format: `POST {base_url}/translate` with a
//! JSON body `{ q, source, target, format }`, answered by
//! `{ "translatedText": … }`.  All connection details come from
//! [`GatewayConfig`]; nothing is hardcoded.

use async_trait::async_trait;

use crate::config::GatewayConfig;

use super::{GatewayError, TranslationGateway, TranslationRequest, TranslationResponse};

/// Calls a LibreTranslate-compatible `/translate` endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Build an `HttpGateway` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl TranslationGateway for HttpGateway {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, GatewayError> {
        // Same-language requests never leave the process.
        if request.source_language == request.target_language {
            return Ok(TranslationResponse::passthrough(request));
        }

        let url = format!("{}/translate", self.config.base_url);

        let mut body = serde_json::json!({
            "q":      request.text,
            "source": request.source_language,
            "target": request.target_language,
            "format": "text",
        });

        // The api_key field is attached only when configured and non-empty —
        // public instances require none.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            body["api_key"] = serde_json::Value::String(key.to_string());
        }

        let response = self.client.post(&url).json(&body).send().await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        let translated = json["translatedText"]
            .as_str()
            .ok_or(GatewayError::EmptyResponse)?
            .trim()
            .to_string();

        if translated.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        Ok(TranslationResponse {
            translated_text: translated,
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
