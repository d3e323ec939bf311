//! Speech playback module.
//!
//! [`SpeechSynthesizer`] is the injected text-to-speech capability.
//! [`SpeechPlayback`] wraps it with the invariants the application needs:
//! at most one active utterance (newest wins), a `is_speaking` flag tracked
//! from utterance start/end/error events, display-name → locale resolution,
//! and fully inert behaviour when the platform has no synthesis facility.

pub mod synthesizer;

pub use synthesizer::{LogSynthesizer, SpeechSynthesizer, UtteranceEvent};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::lang;

// ---------------------------------------------------------------------------
// SpeechPlayback
// ---------------------------------------------------------------------------

/// Speaks text in a given language, newest utterance wins.
///
/// Constructed with `None` (capability absent) every method is an inert
/// no-op — playback controls stay usable, they just do nothing.
pub struct SpeechPlayback {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    speaking: Arc<AtomicBool>,
    /// Id of the most recently started utterance.  Event trackers compare
    /// against it so a cancelled utterance's late events cannot clobber the
    /// `speaking` flag of a newer one.
    utterance_seq: Arc<AtomicU64>,
}

impl SpeechPlayback {
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self {
            synthesizer,
            speaking: Arc::new(AtomicBool::new(false)),
            utterance_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// `true` when a synthesis facility is available.
    pub fn is_enabled(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// `true` while an utterance is playing.
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Speak `text` in `language` (a locale tag or a display name — unknown
    /// values use the default locale).  Any currently playing utterance is
    /// cancelled first.
    pub fn speak(&self, text: &str, language: &str) {
        let Some(synth) = &self.synthesizer else {
            log::debug!("playback: no synthesis facility — speak is a no-op");
            return;
        };
        if text.trim().is_empty() {
            return;
        }

        // Newest wins: cancel whatever is playing before starting.
        synth.cancel();

        let id = self.utterance_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let locale = lang::locale_for(language);
        log::debug!("playback: utterance {id} ({locale}): {text:?}");

        let (events_tx, mut events_rx) = mpsc::channel(8);
        synth.speak(text, locale, events_tx);

        let speaking = Arc::clone(&self.speaking);
        let current = Arc::clone(&self.utterance_seq);
        tokio::spawn(async move {
            while let Some(ev) = events_rx.recv().await {
                // Ignore events from an utterance that has been superseded.
                if current.load(Ordering::SeqCst) != id {
                    break;
                }
                match ev {
                    UtteranceEvent::Started => speaking.store(true, Ordering::SeqCst),
                    UtteranceEvent::Ended => {
                        speaking.store(false, Ordering::SeqCst);
                        break;
                    }
                    UtteranceEvent::Error(msg) => {
                        log::warn!("playback: utterance {id} failed: {msg}");
                        speaking.store(false, Ordering::SeqCst);
                        break;
                    }
                }
            }
        });
    }

    /// Stop any active utterance.
    pub fn cancel(&self) {
        if let Some(synth) = &self.synthesizer {
            synth.cancel();
        }
        // Invalidate the active utterance so its late events are ignored.
        self.utterance_seq.fetch_add(1, Ordering::SeqCst);
        self.speaking.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
