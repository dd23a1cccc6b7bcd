//! # traitors-client
//!
//! Client-side session library for "The Traitors: AI Edition", a
//! social-deduction party game whose rules engine, AI opponents and
//! narration run behind a remote JSON/HTTP worker service.
//!
//! The crate owns the client half of the turn/session synchronization
//! protocol: a snapshot store hydrated from server responses, a total
//! scene-to-phase mapping, one dispatcher per player action, and a
//! single-round-trip transport. Rendering is left to whatever front-end
//! consumes the session (the bundled CLI player is one).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use traitors_client::{GameSession, HttpTransport, QueueItem};
//!
//! # async fn play() -> Result<(), traitors_client::ClientError> {
//! let transport = Arc::new(HttpTransport::from_env());
//! let mut session = GameSession::new(transport);
//!
//! session.start("Ada", 6).await?;
//!
//! loop {
//!     match session.snapshot().current_item() {
//!         Some(QueueItem::HostLine { text }) => {
//!             println!("HOST: {text}");
//!             session.advance().await?;
//!         }
//!         Some(QueueItem::VotePrompt { options, .. }) => {
//!             let target = options[0].id.clone().into();
//!             session.vote(&target).await?;
//!         }
//!         _ => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod contracts;
pub mod domain;
pub mod infrastructure;

// Stable public surface - the main API for library users
pub use application::api::ClientError;
pub use application::session::{GameSession, InputState};
pub use application::signals::{NullSignalSink, RecordingSignalSink, SignalSink, UiSignal};
pub use contracts::{PhaseEndpoint, PhaseOutcome, PhaseRequest};
pub use domain::phase::{scene_to_phase, Phase};
pub use domain::snapshot::{
    ActiveSpeech, ChoiceOption, GameSnapshot, PlayerPublic, PromptKind, QueueItem, RoundMeta,
    SnapshotPayload,
};
pub use domain::transport::{GameTransport, TransportError};
pub use domain::value_objects::{ActionKind, PlayerId, Scene, SessionId, TurnState};
pub use infrastructure::transport::{ClientConfig, HttpTransport, ScriptedTransport};
