//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// GatewayProvider
// ---------------------------------------------------------------------------

/// Selects which translation backend handles requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayProvider {
    /// Offline placeholder backend with phrase-substitution semantics.
    Mock,
    /// LibreTranslate-compatible REST endpoint.
    Http,
}

impl Default for GatewayProvider {
    fn default() -> Self {
        Self::Mock
    }
}

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// Settings for the translation gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Which backend to use.
    pub provider: GatewayProvider,
    /// Base URL of the HTTP endpoint (ignored by the mock backend).
    pub base_url: String,
    /// API key — `None` for public or local instances.
    pub api_key: Option<String>,
    /// Maximum seconds to wait for a translation response.
    pub timeout_secs: u64,
    /// Artificial latency of the mock backend, in milliseconds.
    pub mock_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: GatewayProvider::default(),
            base_url: "http://localhost:5000".into(),
            api_key: None,
            timeout_secs: 10,
            mock_delay_ms: 600,
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageConfig
// ---------------------------------------------------------------------------

/// Initial language pair shown on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Initial source language code.
    pub default_source: String,
    /// Initial target language code.
    pub default_target: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_source: "en-US".into(),
            default_target: "es-ES".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Speech-synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Whether translated text is read aloud automatically after a
    /// successful translation.
    pub auto_speak: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { auto_speak: false }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_translator::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial language pair.
    pub languages: LanguageConfig,
    /// Translation gateway settings.
    pub gateway: GatewayConfig,
    /// Speech-synthesis settings.
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
