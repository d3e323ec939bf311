//! The `SpeechSynthesizer` trait — the injected text-to-speech capability.
//!
//! Like capture, synthesis is event-driven: the platform reports utterance
//! start, end and errors through a channel.  Implementations never block in
//! `speak`; playback runs in the background.

use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// UtteranceEvent
// ---------------------------------------------------------------------------

/// Lifecycle event for a single utterance.
#[derive(Debug, Clone)]
pub enum UtteranceEvent {
    /// Audio output has begun.
    Started,
    /// The utterance finished playing.
    Ended,
    /// Synthesis failed; the utterance is over.
    Error(String),
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a platform speech synthesizer.
///
/// `speak` queues one utterance and returns immediately; its lifecycle is
/// reported on `events`.  `cancel` stops the current utterance, if any, and
/// is safe to call at any time.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str, locale: &str, events: mpsc::Sender<UtteranceEvent>);
    fn cancel(&self);
}

// Compile-time assertion: Box<dyn SpeechSynthesizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechSynthesizer>) {}
};

// ---------------------------------------------------------------------------
// LogSynthesizer
// ---------------------------------------------------------------------------

/// A synthesizer that "speaks" to the terminal.
///
/// Used by the binary so the playback path is exercised on machines without
/// an audio stack: the utterance is printed, and `Ended` is emitted after a
/// delay proportional to the text length to mimic real playback.
pub struct LogSynthesizer;

/// Simulated playback speed.
const MS_PER_CHAR: u64 = 30;
const MAX_UTTERANCE_MS: u64 = 2_000;

impl SpeechSynthesizer for LogSynthesizer {
    fn speak(&self, text: &str, locale: &str, events: mpsc::Sender<UtteranceEvent>) {
        println!("🔊 [{locale}] {text}");

        let duration = std::time::Duration::from_millis(
            (text.chars().count() as u64 * MS_PER_CHAR).min(MAX_UTTERANCE_MS),
        );
        tokio::spawn(async move {
            if events.send(UtteranceEvent::Started).await.is_err() {
                return;
            }
            tokio::time::sleep(duration).await;
            let _ = events.send(UtteranceEvent::Ended).await;
        });
    }

    fn cancel(&self) {
        // Nothing to stop — output has already been printed.  The wrapper's
        // utterance sequencing discards this utterance's remaining events.
        log::debug!("playback: cancel requested");
    }
}

// ---------------------------------------------------------------------------
// RecordingSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that records every `speak`/`cancel` call and hands the
/// utterance event sender back to the test so it can drive the lifecycle.
#[cfg(test)]
pub struct RecordingSynthesizer {
    spoken: std::sync::Mutex<Vec<(String, String)>>,
    senders: std::sync::Mutex<Vec<mpsc::Sender<UtteranceEvent>>>,
    pub cancels: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self {
            spoken: std::sync::Mutex::new(Vec::new()),
            senders: std::sync::Mutex::new(Vec::new()),
            cancels: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// All `(text, locale)` pairs passed to `speak`, in order.
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }

    /// Event sender of the most recent utterance.
    pub fn last_sender(&self) -> mpsc::Sender<UtteranceEvent> {
        self.senders
            .lock()
            .unwrap()
            .last()
            .expect("no utterance spoken yet")
            .clone()
    }
}

#[cfg(test)]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str, locale: &str, events: mpsc::Sender<UtteranceEvent>) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), locale.to_string()));
        self.senders.lock().unwrap().push(events);
    }

    fn cancel(&self) {
        self.cancels
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
