//! The orchestrator command loop and translation dispatch.
//!
//! [`Orchestrator`] owns the [`SharedState`] and responds to [`Command`]s
//! and filtered capture events received over `tokio::sync::mpsc` channels.
//! Gateway calls are spawned as tasks so the loop never blocks; completions
//! re-enter through the shared state guarded by the request sequence number.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::capture::{CaptureController, CaptureError, CaptureEvent};
use crate::gateway::{TranslationGateway, TranslationRequest};
use crate::playback::SpeechPlayback;

use super::state::{Notice, SharedState};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Everything the front-end can ask the orchestrator to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Begin speech capture.
    StartListening,
    /// End speech capture.
    StopListening,
    /// Replace the input text without translating (manual typing).
    SetInput(String),
    /// Translate the current input text (manual submit).
    Translate,
    /// Change the source language; re-translates when input is non-empty.
    SetSourceLanguage(String),
    /// Change the target language; re-translates when input is non-empty.
    SetTargetLanguage(String),
    /// Exchange source and target languages atomically.
    SwapLanguages,
    /// Reset input and translated text.
    Clear,
    /// Read the input text aloud in the source language.
    SpeakInput,
    /// Read the translated text aloud in the target language.
    SpeakTranslation,
}

// ---------------------------------------------------------------------------
// OrchestratorEvent
// ---------------------------------------------------------------------------

/// Event emitted back to the front-end.  [`SharedState`] remains the source
/// of truth; these exist so the front-end does not have to poll it.
#[derive(Debug, Clone)]
pub enum OrchestratorEvent {
    ListeningChanged(bool),
    TranslationStarted,
    TranslationComplete { translated_text: String },
    Notice(Notice),
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the capture → translation → playback pipeline.
///
/// Create with [`Orchestrator::new`], then call [`run`](Self::run) inside a
/// tokio task.
pub struct Orchestrator {
    state: SharedState,
    gateway: Arc<dyn TranslationGateway>,
    capture: CaptureController,
    playback: Arc<SpeechPlayback>,
    events_tx: mpsc::Sender<OrchestratorEvent>,
    /// Sequence number of the most recently dispatched request.  Completion
    /// tasks compare against it under the state lock (last-request-wins).
    seq: Arc<AtomicU64>,
    /// Speak the translated text automatically after each success.
    auto_speak: bool,
}

impl Orchestrator {
    pub fn new(
        state: SharedState,
        gateway: Arc<dyn TranslationGateway>,
        capture: CaptureController,
        playback: Arc<SpeechPlayback>,
        events_tx: mpsc::Sender<OrchestratorEvent>,
        auto_speak: bool,
    ) -> Self {
        Self {
            state,
            gateway,
            capture,
            playback,
            events_tx,
            seq: Arc::new(AtomicU64::new(0)),
            auto_speak,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until the command channel is closed.
    ///
    /// `capture_events` is the receiver half returned by
    /// [`CaptureController::new`].
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut capture_events: mpsc::Receiver<CaptureEvent>,
    ) {
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                Some(ev) = capture_events.recv() => {
                    self.handle_capture_event(ev).await;
                }
            }
        }

        log::info!("orchestrator: command channel closed, shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    pub async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartListening => self.start_listening().await,
            Command::StopListening => self.stop_listening().await,

            Command::SetInput(text) => {
                self.state.lock().unwrap().input_text = text;
            }

            Command::Translate => self.manual_translate().await,

            Command::SetSourceLanguage(code) => {
                let input = {
                    let mut st = self.state.lock().unwrap();
                    st.source_language = code;
                    st.input_text.clone()
                };
                self.retranslate_if_input(input).await;
            }

            Command::SetTargetLanguage(code) => {
                let input = {
                    let mut st = self.state.lock().unwrap();
                    st.target_language = code;
                    st.input_text.clone()
                };
                self.retranslate_if_input(input).await;
            }

            Command::SwapLanguages => {
                // Both fields change under one lock — no observer can see
                // the pair half-swapped.
                let mut st = self.state.lock().unwrap();
                let st = &mut *st;
                std::mem::swap(&mut st.source_language, &mut st.target_language);
                log::debug!(
                    "orchestrator: languages swapped ({} → {})",
                    st.source_language,
                    st.target_language
                );
            }

            Command::Clear => {
                // Invalidate any in-flight request so a late completion
                // cannot resurrect the cleared text.
                self.seq.fetch_add(1, Ordering::SeqCst);
                let mut st = self.state.lock().unwrap();
                st.input_text.clear();
                st.translated_text.clear();
                st.translating = false;
            }

            Command::SpeakInput => {
                let (text, language) = {
                    let st = self.state.lock().unwrap();
                    (st.input_text.clone(), st.source_language.clone())
                };
                self.playback.speak(&text, &language);
            }

            Command::SpeakTranslation => {
                let (text, language) = {
                    let st = self.state.lock().unwrap();
                    (st.translated_text.clone(), st.target_language.clone())
                };
                self.playback.speak(&text, &language);
            }
        }
    }

    pub async fn handle_capture_event(&mut self, ev: CaptureEvent) {
        match ev {
            CaptureEvent::Transcript(text) => {
                log::debug!("orchestrator: transcript: {text:?}");
                self.state.lock().unwrap().input_text = text.clone();
                self.dispatch(text).await;
            }

            CaptureEvent::Stopped => {
                self.state.lock().unwrap().listening = false;
                self.emit(OrchestratorEvent::ListeningChanged(false)).await;
            }

            CaptureEvent::Failed(e) => {
                self.state.lock().unwrap().listening = false;
                self.emit(OrchestratorEvent::ListeningChanged(false)).await;

                let message = match e {
                    CaptureError::PermissionDenied => {
                        "Microphone access was denied. Please allow microphone access to use this feature.".to_string()
                    }
                    other => format!("Speech recognition error: {other}"),
                };
                self.notify(Notice::error(message)).await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Capture
    // -----------------------------------------------------------------------

    async fn start_listening(&mut self) {
        match self.capture.start() {
            Ok(()) => {
                self.state.lock().unwrap().listening = true;
                self.emit(OrchestratorEvent::ListeningChanged(true)).await;
            }
            Err(CaptureError::Unsupported) => {
                self.notify(Notice::warning(
                    "Speech recognition is not available — type your text instead.",
                ))
                .await;
            }
            Err(e) => {
                self.notify(Notice::error(format!("Could not start listening: {e}")))
                    .await;
            }
        }
    }

    async fn stop_listening(&mut self) {
        self.capture.stop();
        self.state.lock().unwrap().listening = false;
        self.emit(OrchestratorEvent::ListeningChanged(false)).await;
    }

    // -----------------------------------------------------------------------
    // Translation dispatch
    // -----------------------------------------------------------------------

    async fn manual_translate(&mut self) {
        let input = self.state.lock().unwrap().input_text.clone();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.notify(Notice::warning("Please enter some text to translate"))
                .await;
            return;
        }
        self.dispatch(trimmed.to_string()).await;
    }

    async fn retranslate_if_input(&mut self, input: String) {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            self.dispatch(trimmed.to_string()).await;
        }
    }

    /// Dispatch a translation request for `text` with the current language
    /// pair.  Returns immediately; the completion task updates state only if
    /// this request is still the newest one.
    async fn dispatch(&mut self, text: String) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (source, target) = {
            let mut st = self.state.lock().unwrap();
            st.translating = true;
            (st.source_language.clone(), st.target_language.clone())
        };

        log::debug!("orchestrator: request {seq}: {source} → {target}");
        self.emit(OrchestratorEvent::TranslationStarted).await;

        let request = TranslationRequest {
            text,
            source_language: source,
            target_language: target,
        };

        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        let newest = Arc::clone(&self.seq);
        let events = self.events_tx.clone();
        let playback = Arc::clone(&self.playback);
        let auto_speak = self.auto_speak;

        tokio::spawn(async move {
            let result = gateway.translate(&request).await;

            // Completion gate: checked under the state lock so a stale
            // response can never overwrite a newer one.
            let outcome = {
                let mut st = state.lock().unwrap();
                if newest.load(Ordering::SeqCst) != seq {
                    log::debug!("orchestrator: discarding stale completion {seq}");
                    return;
                }
                st.translating = false;
                match result {
                    Ok(resp) => {
                        st.translated_text = resp.translated_text.clone();
                        Ok(resp)
                    }
                    Err(e) => {
                        // Input and previous translation stay untouched;
                        // retry is user-initiated.
                        let notice = Notice::error("Translation failed. Please try again.");
                        st.notice = Some(notice.clone());
                        log::warn!("orchestrator: request {seq} failed: {e}");
                        Err(notice)
                    }
                }
            };

            match outcome {
                Ok(resp) => {
                    let _ = events
                        .send(OrchestratorEvent::TranslationComplete {
                            translated_text: resp.translated_text.clone(),
                        })
                        .await;
                    if auto_speak {
                        playback.speak(&resp.translated_text, &resp.target_language);
                    }
                }
                Err(notice) => {
                    let _ = events.send(OrchestratorEvent::Notice(notice)).await;
                }
            }
        });
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn notify(&self, notice: Notice) {
        self.state.lock().unwrap().notice = Some(notice.clone());
        self.emit(OrchestratorEvent::Notice(notice)).await;
    }

    async fn emit(&self, event: OrchestratorEvent) {
        let _ = self.events_tx.send(event).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::capture::{RecognizerEvent, ScriptedRecognizer, SpeechRecognizer};
    use crate::config::LanguageConfig;
    use crate::gateway::{GatewayError, MockGateway, TranslationResponse};
    use crate::orchestrator::state::{new_shared_state, NoticeLevel};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Gateway that tags the text with the target language and sleeps a
    /// per-call delay popped from a queue, so tests can stage overlapping
    /// requests with controlled completion order.
    struct StaggeredGateway {
        delays: Mutex<VecDeque<Duration>>,
        calls: AtomicUsize,
    }

    impl StaggeredGateway {
        fn new(delays: &[Duration]) -> Arc<Self> {
            Arc::new(Self {
                delays: Mutex::new(delays.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            })
        }

        fn immediate() -> Arc<Self> {
            Self::new(&[])
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationGateway for StaggeredGateway {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<TranslationResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self
                .delays
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Duration::ZERO);
            tokio::time::sleep(delay).await;

            Ok(TranslationResponse {
                translated_text: format!("{} [{}]", request.text, request.target_language),
                source_language: request.source_language.clone(),
                target_language: request.target_language.clone(),
            })
        }
    }

    /// Gateway that always rejects.
    struct FailGateway;

    #[async_trait]
    impl TranslationGateway for FailGateway {
        async fn translate(
            &self,
            _request: &TranslationRequest,
        ) -> Result<TranslationResponse, GatewayError> {
            Err(GatewayError::Request("connection refused".into()))
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    struct Harness {
        orch: Orchestrator,
        state: SharedState,
        events_rx: mpsc::Receiver<OrchestratorEvent>,
        capture_rx: mpsc::Receiver<CaptureEvent>,
    }

    fn make(
        gateway: Arc<dyn TranslationGateway>,
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
    ) -> Harness {
        let state = new_shared_state(&LanguageConfig::default());
        let (capture, capture_rx) = CaptureController::new(recognizer);
        let playback = Arc::new(SpeechPlayback::new(None));
        let (events_tx, events_rx) = mpsc::channel(32);

        let orch = Orchestrator::new(
            Arc::clone(&state),
            gateway,
            capture,
            playback,
            events_tx,
            false,
        );
        Harness { orch, state, events_rx, capture_rx }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // -----------------------------------------------------------------------
    // Manual translate / validation
    // -----------------------------------------------------------------------

    /// Empty or whitespace-only input must never reach the gateway and must
    /// raise a validation warning.
    #[tokio::test]
    async fn empty_manual_submit_never_invokes_gateway() {
        let gateway = StaggeredGateway::immediate();
        let mut h = make(gateway.clone(), None);

        h.orch.handle_command(Command::SetInput("   ".into())).await;
        h.orch.handle_command(Command::Translate).await;
        settle().await;

        assert_eq!(gateway.call_count(), 0);
        let st = h.state.lock().unwrap();
        let notice = st.notice.as_ref().expect("expected a validation warning");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(st.translated_text.is_empty());
    }

    #[tokio::test]
    async fn manual_submit_trims_input_before_dispatch() {
        let gateway = StaggeredGateway::immediate();
        let mut h = make(gateway.clone(), None);

        h.orch
            .handle_command(Command::SetInput("  hello  ".into()))
            .await;
        h.orch.handle_command(Command::Translate).await;
        settle().await;

        assert_eq!(gateway.call_count(), 1);
        let st = h.state.lock().unwrap();
        assert_eq!(st.translated_text, "hello [es-ES]");
        assert!(!st.translating);
    }

    // -----------------------------------------------------------------------
    // Language selection
    // -----------------------------------------------------------------------

    /// Swapping twice restores the original pair, and each swap updates both
    /// fields together.
    #[tokio::test]
    async fn double_swap_restores_language_pair() {
        let mut h = make(StaggeredGateway::immediate(), None);

        h.orch.handle_command(Command::SwapLanguages).await;
        {
            let st = h.state.lock().unwrap();
            assert_eq!(st.source_language, "es-ES");
            assert_eq!(st.target_language, "en-US");
        }

        h.orch.handle_command(Command::SwapLanguages).await;
        let st = h.state.lock().unwrap();
        assert_eq!(st.source_language, "en-US");
        assert_eq!(st.target_language, "es-ES");
    }

    #[tokio::test]
    async fn language_change_with_input_retranslates() {
        let gateway = StaggeredGateway::immediate();
        let mut h = make(gateway.clone(), None);

        h.orch.handle_command(Command::SetInput("hello".into())).await;
        h.orch
            .handle_command(Command::SetTargetLanguage("fr-FR".into()))
            .await;
        settle().await;

        assert_eq!(gateway.call_count(), 1);
        let st = h.state.lock().unwrap();
        assert_eq!(st.translated_text, "hello [fr-FR]");
    }

    #[tokio::test]
    async fn language_change_without_input_does_not_dispatch() {
        let gateway = StaggeredGateway::immediate();
        let mut h = make(gateway.clone(), None);

        h.orch
            .handle_command(Command::SetSourceLanguage("de-DE".into()))
            .await;
        settle().await;

        assert_eq!(gateway.call_count(), 0);
        assert_eq!(h.state.lock().unwrap().source_language, "de-DE");
    }

    // -----------------------------------------------------------------------
    // Last-request-wins
    // -----------------------------------------------------------------------

    /// R1 dispatched first but resolving last must lose to R2.
    #[tokio::test]
    async fn stale_completion_never_overwrites_newer_result() {
        // First call is slow, second is fast — R1 resolves after R2.
        let gateway = StaggeredGateway::new(&[
            Duration::from_millis(150),
            Duration::from_millis(10),
        ]);
        let mut h = make(gateway.clone(), None);

        h.orch.handle_command(Command::SetInput("hello".into())).await;
        h.orch.handle_command(Command::Translate).await; // R1 → es-ES
        h.orch
            .handle_command(Command::SetTargetLanguage("fr-FR".into()))
            .await; // R2 → fr-FR

        tokio::time::sleep(Duration::from_millis(300)).await;

        let st = h.state.lock().unwrap();
        assert_eq!(gateway.call_count(), 2);
        assert_eq!(st.translated_text, "hello [fr-FR]");
        assert!(!st.translating);
    }

    /// Clearing while a request is in flight must leave the text empty even
    /// after the late completion arrives.
    #[tokio::test]
    async fn clear_discards_in_flight_result() {
        let gateway = StaggeredGateway::new(&[Duration::from_millis(100)]);
        let mut h = make(gateway.clone(), None);

        h.orch.handle_command(Command::SetInput("hello".into())).await;
        h.orch.handle_command(Command::Translate).await;
        h.orch.handle_command(Command::Clear).await;

        tokio::time::sleep(Duration::from_millis(250)).await;

        let st = h.state.lock().unwrap();
        assert!(st.input_text.is_empty());
        assert!(st.translated_text.is_empty());
        assert!(!st.translating);
    }

    // -----------------------------------------------------------------------
    // Gateway failure
    // -----------------------------------------------------------------------

    /// A rejected request surfaces a notice and leaves existing text alone.
    #[tokio::test]
    async fn gateway_failure_raises_notice_and_preserves_text() {
        let mut h = make(Arc::new(FailGateway), None);

        {
            let mut st = h.state.lock().unwrap();
            st.input_text = "hello".into();
            st.translated_text = "previous result".into();
        }
        h.orch.handle_command(Command::Translate).await;
        settle().await;

        let st = h.state.lock().unwrap();
        assert_eq!(st.translated_text, "previous result");
        assert!(!st.translating);
        let notice = st.notice.as_ref().expect("expected a failure notice");
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    // -----------------------------------------------------------------------
    // Capture integration
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn start_listening_without_recognizer_degrades_to_warning() {
        let mut h = make(StaggeredGateway::immediate(), None);

        h.orch.handle_command(Command::StartListening).await;

        let st = h.state.lock().unwrap();
        assert!(!st.listening);
        let notice = st.notice.as_ref().expect("expected a capability warning");
        assert_eq!(notice.level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn stop_listening_when_idle_is_harmless() {
        let mut h = make(StaggeredGateway::immediate(), None);

        h.orch.handle_command(Command::StopListening).await;

        let st = h.state.lock().unwrap();
        assert!(!st.listening);
        assert!(st.notice.is_none());
    }

    #[tokio::test]
    async fn permission_denied_surfaces_error_and_stops_listening() {
        let mut h = make(StaggeredGateway::immediate(), None);

        h.orch
            .handle_capture_event(CaptureEvent::Failed(CaptureError::PermissionDenied))
            .await;

        let st = h.state.lock().unwrap();
        assert!(!st.listening);
        let notice = st.notice.as_ref().expect("expected an error notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("Microphone access was denied"));
    }

    /// End-to-end: a spoken transcript flows through capture filtering into
    /// a dispatched translation using the mock gateway's real phrase table.
    #[tokio::test]
    async fn transcript_end_to_end_hello_there_becomes_hola_there() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![RecognizerEvent::Result {
            text: "  hello there  ".into(),
            is_final: true,
        }]));
        let gateway = Arc::new(MockGateway::new(Duration::ZERO));
        let h = make(gateway, Some(recognizer));

        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let state = Arc::clone(&h.state);
        let handle = tokio::spawn(h.orch.run(cmd_rx, h.capture_rx));

        cmd_tx.send(Command::StartListening).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        {
            let st = state.lock().unwrap();
            assert_eq!(st.input_text, "hello there");
            assert!(st.translated_text.contains("hola there"));
        }

        drop(cmd_tx);
        handle.await.unwrap();
    }

    /// End-to-end in the other direction: es-ES → en-US phrase substitution.
    #[tokio::test]
    async fn transcript_end_to_end_gracias_becomes_thank_you() {
        let recognizer = Arc::new(ScriptedRecognizer::with_final("Gracias amigo"));
        let gateway = Arc::new(MockGateway::new(Duration::ZERO));
        let h = make(gateway, Some(recognizer));

        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let state = Arc::clone(&h.state);
        let handle = tokio::spawn(h.orch.run(cmd_rx, h.capture_rx));

        cmd_tx
            .send(Command::SetSourceLanguage("es-ES".into()))
            .await
            .unwrap();
        cmd_tx
            .send(Command::SetTargetLanguage("en-US".into()))
            .await
            .unwrap();
        cmd_tx.send(Command::StartListening).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        {
            let st = state.lock().unwrap();
            assert_eq!(st.translated_text, "thank you amigo");
        }

        drop(cmd_tx);
        handle.await.unwrap();
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn successful_translation_emits_complete_event() {
        let mut h = make(StaggeredGateway::immediate(), None);

        h.orch.handle_command(Command::SetInput("hello".into())).await;
        h.orch.handle_command(Command::Translate).await;
        settle().await;

        let mut saw_complete = false;
        while let Ok(ev) = h.events_rx.try_recv() {
            if let OrchestratorEvent::TranslationComplete { translated_text } = ev {
                assert_eq!(translated_text, "hello [es-ES]");
                saw_complete = true;
            }
        }
        assert!(saw_complete);
    }
}
