//! Application entry point — Voice Translator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the tokio runtime (multi-thread, 2 workers).
//! 4. Build the translation gateway from config (mock or HTTP).
//! 5. Build capture and playback collaborators.  No platform speech
//!    recognizer ships with the binary, so capture degrades to text-only;
//!    playback goes through [`LogSynthesizer`].
//! 6. Spawn the orchestrator on the runtime.
//! 7. Run the terminal front-end — blocks the main thread until `:quit`.

use std::sync::Arc;

use tokio::sync::mpsc;

use voice_translator::{
    app::{self, AppContext},
    capture::CaptureController,
    config::AppConfig,
    gateway,
    orchestrator::{new_shared_state, Orchestrator},
    playback::{LogSynthesizer, SpeechPlayback},
    session::{AuthService, SessionStore},
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Voice Translator starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (orchestrator + gateway calls)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    // 4. Translation gateway
    let translation = gateway::from_config(&config.gateway);
    log::info!("Gateway provider: {:?}", config.gateway.provider);

    // 5. Collaborators.  There is no in-process speech recognizer — capture
    //    is an integration point — so the binary runs text-only.
    let (capture, capture_rx) = CaptureController::new(None);
    log::info!("No speech recognizer available; voice input disabled");

    let playback = Arc::new(SpeechPlayback::new(Some(Arc::new(LogSynthesizer))));

    // 6. Orchestrator
    let state = new_shared_state(&config.languages);
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (events_tx, events_rx) = mpsc::channel(32);

    let orchestrator = Orchestrator::new(
        Arc::clone(&state),
        translation,
        capture,
        playback,
        events_tx,
        config.playback.auto_speak,
    );
    rt.spawn(orchestrator.run(cmd_rx, capture_rx));

    // 7. Front-end (blocks until :quit or EOF)
    let ctx = AppContext {
        commands: cmd_tx,
        state,
        auth: AuthService::new(SessionStore::new()),
    };
    app::run(ctx, events_rx)?;

    log::info!("Voice Translator shutting down");
    Ok(())
}
