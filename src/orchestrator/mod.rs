//! Translation orchestrator — the core of the application.
//!
//! Coordinates capture → translation → display → optional playback:
//!
//! ```text
//! CaptureEvent::Transcript ─┐
//! Command::Translate ───────┼─▶ dispatch(seq n) ──▶ gateway.translate()
//! Command::Set*Language ────┘         │                    │
//!                                     ▼                    ▼
//!                              SessionState ◀── completion (kept only if
//!                                                seq n is still newest)
//! ```
//!
//! Overlapping requests resolve last-request-wins: every dispatch takes the
//! next value of a monotonically increasing sequence number, and a
//! completion whose number is no longer the newest is discarded.  There is
//! no hard cancellation — stale responses are simply ignored.

pub mod runner;
pub mod state;

pub use runner::{Command, Orchestrator, OrchestratorEvent};
pub use state::{new_shared_state, Notice, NoticeLevel, Phase, SessionState, SharedState};
