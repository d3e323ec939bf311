//! Voice Translator — speak or type text, get a translated rendition back,
//! optionally read aloud.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐  CaptureEvent   ┌──────────────────────┐
//! │ capture        │────────────────▶│ orchestrator         │
//! │ (recognizer)   │                 │  - SessionState      │
//! └────────────────┘                 │  - command loop      │
//!                                    │  - last-request-wins │
//! ┌────────────────┐    Command      └──────┬───────────────┘
//! │ app (terminal) │───────────────────────▶│
//! └────────────────┘                        │ translate()
//!                                           ▼
//!                                    ┌──────────────────────┐
//!                                    │ gateway              │
//!                                    │  Mock / Http         │
//!                                    └──────┬───────────────┘
//!                                           │ speak()
//!                                           ▼
//!                                    ┌──────────────────────┐
//!                                    │ playback             │
//!                                    └──────────────────────┘
//! ```
//!
//! The speech facilities are injected collaborators: [`capture`] and
//! [`playback`] define object-safe traits so the orchestrator can be driven
//! entirely by test doubles, and the binary degrades to text-only when no
//! platform recognizer is available.

pub mod app;
pub mod capture;
pub mod config;
pub mod gateway;
pub mod lang;
pub mod orchestrator;
pub mod playback;
pub mod session;
