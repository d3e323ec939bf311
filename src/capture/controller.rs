//! `CaptureController` — session lifecycle and event filtering on top of a
//! [`SpeechRecognizer`].
//!
//! The controller is the only place that talks to the recognizer directly.
//! It guarantees:
//!
//! - at most one active session (`start` while listening is a no-op);
//! - `stop` is idempotent and safe on an idle controller;
//! - only finalized, trimmed, non-empty transcripts reach the consumer;
//! - `NoSpeechDetected` is logged and swallowed;
//! - any other error auto-stops the session and surfaces as
//!   [`CaptureEvent::Failed`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::recognizer::{CaptureError, RecognizerEvent, SpeechRecognizer};

// ---------------------------------------------------------------------------
// CaptureEvent
// ---------------------------------------------------------------------------

/// Filtered capture event delivered to the orchestrator.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// A finalized transcript segment, trimmed and non-empty.
    Transcript(String),

    /// The session ended on its own (platform end-of-session).
    Stopped,

    /// The session failed and was auto-stopped.
    Failed(CaptureError),
}

// ---------------------------------------------------------------------------
// CaptureController
// ---------------------------------------------------------------------------

struct Inner {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    listening: AtomicBool,
}

impl Inner {
    /// Transition to idle and stop the recognizer session if one was active.
    fn halt(&self) {
        if self.listening.swap(false, Ordering::SeqCst) {
            if let Some(rec) = &self.recognizer {
                rec.stop();
            }
        }
    }
}

/// Wraps an optional [`SpeechRecognizer`] with session lifecycle policy.
///
/// `None` models a platform without speech capture: [`start`] fails with
/// [`CaptureError::Unsupported`] and the application degrades to text-only
/// input.
///
/// [`start`]: CaptureController::start
pub struct CaptureController {
    inner: Arc<Inner>,
    events_tx: mpsc::Sender<CaptureEvent>,
}

impl CaptureController {
    /// Create a controller and the receiver its events arrive on.
    pub fn new(
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
    ) -> (Self, mpsc::Receiver<CaptureEvent>) {
        let (events_tx, events_rx) = mpsc::channel(32);
        let controller = Self {
            inner: Arc::new(Inner {
                recognizer,
                listening: AtomicBool::new(false),
            }),
            events_tx,
        };
        (controller, events_rx)
    }

    /// `true` when a platform recognizer is available at all.
    pub fn is_supported(&self) -> bool {
        self.inner.recognizer.is_some()
    }

    /// `true` while a capture session is active.
    pub fn is_listening(&self) -> bool {
        self.inner.listening.load(Ordering::SeqCst)
    }

    /// Begin a capture session.
    ///
    /// Calling `start` while already listening is a no-op — a second platform
    /// session is never spawned.
    ///
    /// # Errors
    ///
    /// [`CaptureError::Unsupported`] when no recognizer is present.  Note
    /// that permission denial is *not* reported here: it arrives later as a
    /// [`CaptureEvent::Failed`] on the event channel.
    pub fn start(&self) -> Result<(), CaptureError> {
        let rec = match &self.inner.recognizer {
            Some(rec) => Arc::clone(rec),
            None => return Err(CaptureError::Unsupported),
        };

        if self.inner.listening.swap(true, Ordering::SeqCst) {
            log::debug!("capture: start while already listening — ignored");
            return Ok(());
        }

        let (raw_tx, raw_rx) = mpsc::channel(32);
        if let Err(e) = rec.start(raw_tx) {
            self.inner.listening.store(false, Ordering::SeqCst);
            return Err(e);
        }

        tokio::spawn(pump(
            Arc::clone(&self.inner),
            raw_rx,
            self.events_tx.clone(),
        ));

        log::debug!("capture: session started");
        Ok(())
    }

    /// End the capture session.  Idempotent: safe on an idle controller.
    pub fn stop(&self) {
        self.inner.halt();
    }
}

/// Drain raw recognizer events, applying the filtering policy.
async fn pump(
    inner: Arc<Inner>,
    mut raw_rx: mpsc::Receiver<RecognizerEvent>,
    out: mpsc::Sender<CaptureEvent>,
) {
    while let Some(ev) = raw_rx.recv().await {
        match ev {
            RecognizerEvent::Result { text, is_final } => {
                // Interim partials are intentionally discarded.
                if !is_final {
                    continue;
                }
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                // Late results after stop() are dropped.
                if !inner.listening.load(Ordering::SeqCst) {
                    log::debug!("capture: dropping transcript after stop: {text:?}");
                    continue;
                }
                if out.send(CaptureEvent::Transcript(text.to_string())).await.is_err() {
                    break;
                }
            }

            RecognizerEvent::Error(e) if !e.is_fatal() => {
                log::debug!("capture: {e} — ignored");
            }

            RecognizerEvent::Error(e) => {
                log::warn!("capture: session failed: {e}");
                inner.halt();
                let _ = out.send(CaptureEvent::Failed(e)).await;
                break;
            }

            RecognizerEvent::Ended => {
                inner.listening.store(false, Ordering::SeqCst);
                let _ = out.send(CaptureEvent::Stopped).await;
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
