//! Session state and the phase machine the front-end renders from.
//!
//! [`SessionState`] is the single source of truth for everything the UI
//! needs: current text pair, language pair, listening/translating flags and
//! the most recent user-facing notice.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>` — cheap to
//! clone and safe to share between the orchestrator loop, its spawned
//! completion tasks and the front-end.

use std::sync::{Arc, Mutex};

use crate::config::LanguageConfig;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Coarse phase of the translation session.
///
/// ```text
/// Idle ──capture start──▶ Listening
///      ◀─capture stop/error─
/// Idle ──dispatch (transcript or manual)──▶ Translating
///      ◀─response or failure─
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Listening,
    Translating,
}

impl Phase {
    /// A short human-readable label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Listening => "Listening",
            Phase::Translating => "Translating",
        }
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Severity of a user-facing notice (the toast equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A user-facing notification.  Nothing that produces one is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Shared session state — created when the application starts, mutated by
/// orchestrator handlers and completion tasks, discarded on shutdown.
/// Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Capture session active.
    pub listening: bool,
    /// Current input text (typed or transcribed).
    pub input_text: String,
    /// Most recent translation result; overwritten by the next request.
    pub translated_text: String,
    /// Current source language code.
    pub source_language: String,
    /// Current target language code.
    pub target_language: String,
    /// A translation request is in flight.
    pub translating: bool,
    /// Most recent user-facing notice, if any.
    pub notice: Option<Notice>,
}

impl SessionState {
    /// Fresh state with the configured initial language pair.
    pub fn new(languages: &LanguageConfig) -> Self {
        Self {
            listening: false,
            input_text: String::new(),
            translated_text: String::new(),
            source_language: languages.default_source.clone(),
            target_language: languages.default_target.clone(),
            translating: false,
            notice: None,
        }
    }

    /// Current phase, derived from the flags.  An in-flight translation
    /// dominates since it is what the user is waiting on.
    pub fn phase(&self) -> Phase {
        if self.translating {
            Phase::Translating
        } else if self.listening {
            Phase::Listening
        } else {
            Phase::Idle
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&LanguageConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] with the configured language pair.
pub fn new_shared_state(languages: &LanguageConfig) -> SharedState {
    Arc::new(Mutex::new(SessionState::new(languages)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
