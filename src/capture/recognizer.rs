//! The `SpeechRecognizer` trait — the injected speech-to-text capability.
//!
//! A recognizer session is inherently asynchronous and event-driven: results
//! and errors arrive on a channel after `start` returns, never as return
//! values.  Permission denial in particular is only observable this way.

use thiserror::Error;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors raised by the speech-capture subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The platform offers no speech-to-text facility.
    #[error("speech recognition is not supported on this platform")]
    Unsupported,

    /// The user declined microphone access.  Recoverable: the user can retry
    /// after granting permission.
    #[error("microphone access was denied")]
    PermissionDenied,

    /// The recognizer heard nothing.  Transient; never surfaced to the user.
    #[error("no speech detected")]
    NoSpeechDetected,

    /// Any other platform error.
    #[error("speech recognition error: {0}")]
    Other(String),
}

impl CaptureError {
    /// Fatal errors terminate the capture session; `NoSpeechDetected` is the
    /// single non-fatal kind.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CaptureError::NoSpeechDetected)
    }
}

// ---------------------------------------------------------------------------
// RecognizerEvent
// ---------------------------------------------------------------------------

/// Raw event emitted by a recognizer session.
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// A recognition result.  `is_final` distinguishes finalized segments
    /// from interim partials.
    Result { text: String, is_final: bool },

    /// An error inside the session.  Fatal kinds end the session.
    Error(CaptureError),

    /// The platform ended the session on its own.
    Ended,
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a platform speech recognizer.
///
/// # Contract
///
/// - `start` begins a capture session; all results and errors are delivered
///   through `events` on the async runtime, never returned directly.
/// - `stop` must be safe to call at any time, including when no session is
///   active.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin a capture session, delivering events to `events`.
    fn start(&self, events: mpsc::Sender<RecognizerEvent>) -> Result<(), CaptureError>;

    /// End the current session, if any.
    fn stop(&self);
}

// Compile-time assertion: Box<dyn SpeechRecognizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechRecognizer>) {}
};

// ---------------------------------------------------------------------------
// ScriptedRecognizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that replays a fixed list of events on `start` and counts
/// `start`/`stop` calls so tests can assert on session lifecycle.
#[cfg(test)]
pub struct ScriptedRecognizer {
    script: std::sync::Mutex<Vec<RecognizerEvent>>,
    pub starts: std::sync::atomic::AtomicUsize,
    pub stops: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedRecognizer {
    pub fn new(script: Vec<RecognizerEvent>) -> Self {
        Self {
            script: std::sync::Mutex::new(script),
            starts: std::sync::atomic::AtomicUsize::new(0),
            stops: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Convenience: a script that emits one final transcript.
    pub fn with_final(text: &str) -> Self {
        Self::new(vec![RecognizerEvent::Result {
            text: text.to_string(),
            is_final: true,
        }])
    }
}

#[cfg(test)]
impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&self, events: mpsc::Sender<RecognizerEvent>) -> Result<(), CaptureError> {
        use std::sync::atomic::Ordering;
        self.starts.fetch_add(1, Ordering::SeqCst);

        let script = std::mem::take(&mut *self.script.lock().unwrap());
        tokio::spawn(async move {
            for ev in script {
                if events.send(ev).await.is_err() {
                    break;
                }
            }
        });
        Ok(())
    }

    fn stop(&self) {
        use std::sync::atomic::Ordering;
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
