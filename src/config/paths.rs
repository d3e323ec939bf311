//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (settings + session blob):
//!   Windows: %APPDATA%\voice-translator\
//!   macOS:   ~/Library/Application Support/voice-translator/
//!   Linux:   ~/.config/voice-translator/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `session.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `session.json` (the signed-in user blob).
    pub session_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voice-translator";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let session_file = config_dir.join("session.json");

        Self {
            config_dir,
            settings_file,
            session_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
