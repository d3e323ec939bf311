//! Speech capture module.
//!
//! [`SpeechRecognizer`] is the injected platform capability (continuous
//! speech-to-text with interim and final results).  [`CaptureController`]
//! wraps it with the policy the rest of the application relies on: only
//! finalized, trimmed, non-empty transcripts are surfaced; `NoSpeechDetected`
//! is swallowed; fatal errors auto-stop the session; `start`/`stop` are safe
//! to call in any state.

pub mod controller;
pub mod recognizer;

pub use controller::{CaptureController, CaptureEvent};
pub use recognizer::{CaptureError, RecognizerEvent, SpeechRecognizer};

// test-only re-export so orchestrator tests can drive a scripted session
// without spelling out the full path.
#[cfg(test)]
pub use recognizer::ScriptedRecognizer;
