//! Game session - owns the snapshot store and the action dispatchers.
//!
//! Every dispatcher follows one template: check local preconditions, mark the
//! session busy, perform exactly one transport round trip, hydrate the store
//! from the response (clearing the inputs that action consumed), and unmark
//! busy on every control path. A transport failure only sets the error value;
//! the last-known-good snapshot survives so the user can simply retry.

use crate::application::api::ClientError;
use crate::application::signals::{NullSignalSink, SignalSink, UiSignal};
use crate::contracts::{
    paths, AdvanceRequest, PhaseEndpoint, PhaseOutcome, PhaseRequest, RespondRequest,
    StartRequest, VoteRequest,
};
use crate::domain::phase::Phase;
use crate::domain::snapshot::{GameSnapshot, SnapshotPayload};
use crate::domain::transport::GameTransport;
use crate::domain::value_objects::{PlayerId, SessionId};
use serde::Serialize;
use std::sync::Arc;

/// Pending local input values, never sent to the server except as the
/// submitted value of a dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub day_statement: String,
    pub parlor_statement: String,
    pub roundtable_statement: String,
    pub vote_target: Option<PlayerId>,
    pub murder_target: Option<PlayerId>,
}

impl InputState {
    /// Clear the inputs a successful respond consumes
    fn clear_statements(&mut self) {
        self.day_statement.clear();
        self.parlor_statement.clear();
        self.roundtable_statement.clear();
        self.murder_target = None;
    }

    fn clear_all(&mut self) {
        *self = Self::default();
    }
}

fn encode<T: Serialize>(request: &T) -> serde_json::Value {
    // Our request types serialize infallibly; Null would be rejected
    // server-side like any other bad request.
    serde_json::to_value(request).unwrap_or(serde_json::Value::Null)
}

/// One play session against the remote game service.
///
/// Single-threaded by construction: dispatchers take `&mut self`, and the
/// `busy` flag additionally refuses dispatches issued while a round trip is
/// outstanding (mutual exclusion, not a queue - a refused dispatch is
/// dropped and the caller retries once the in-flight call resolves).
pub struct GameSession {
    transport: Arc<dyn GameTransport>,
    signals: Arc<dyn SignalSink>,
    snapshot: GameSnapshot,
    session_id: Option<SessionId>,
    inputs: InputState,
    busy: bool,
}

impl GameSession {
    pub fn new(transport: Arc<dyn GameTransport>) -> Self {
        Self {
            transport,
            signals: Arc::new(NullSignalSink),
            snapshot: GameSnapshot::initial(),
            session_id: None,
            inputs: InputState::default(),
            busy: false,
        }
    }

    /// Attach a signal sink for the decorative side channel
    pub fn with_signal_sink(mut self, sink: Arc<dyn SignalSink>) -> Self {
        self.signals = sink;
        self
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.phase()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.snapshot.error.as_deref()
    }

    pub fn inputs(&self) -> &InputState {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputState {
        &mut self.inputs
    }

    /// Start a new play session.
    ///
    /// The one dispatcher that runs without a session handle; the handle in
    /// the response becomes the session's for every later action, replacing
    /// any handle a previous start left behind. An empty name is a local
    /// validation error and makes no network call. Like the session-bearing
    /// dispatchers, a start issued while a round trip is outstanding is
    /// dropped.
    pub async fn start(&mut self, human_name: &str, ai_count: u32) -> Result<(), ClientError> {
        if self.busy {
            return Ok(());
        }
        let name = human_name.trim();
        if name.is_empty() {
            let message = "Enter your name first.";
            self.snapshot.set_error(message);
            return Err(ClientError::validation(message));
        }

        let body = encode(&StartRequest {
            human_name: name,
            ai_count,
        });
        let response = self.round_trip(paths::START, body).await?;
        // A successful start abandons whatever game the old handle pointed
        // at; the response's handle wins.
        self.session_id = None;
        self.hydrate_value(response)
    }

    /// Advance past the current queue item
    pub async fn advance(&mut self) -> Result<(), ClientError> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(());
        };
        if self.busy {
            return Ok(());
        }

        if let Some(item) = self.snapshot.current_item() {
            self.signals.emit(UiSignal::LineEnded {
                item_type: item.type_name().to_string(),
                speaker: item.speaker().map(str::to_string),
            });
        }

        let body = encode(&AdvanceRequest {
            session_id: &session_id,
        });
        let response = self.round_trip(paths::ADVANCE, body).await?;
        self.hydrate_value(response)
    }

    /// Answer the current prompt with free text, a choice id, or both.
    ///
    /// The choice id is sent as both `choice` and `target`; which one the
    /// server reads depends on the prompt kind. Clears the statement inputs
    /// and the murder target on success.
    pub async fn respond(&mut self, text: &str, choice: Option<&str>) -> Result<(), ClientError> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(());
        };
        if self.busy {
            return Ok(());
        }

        let choice = choice.unwrap_or("");
        let body = encode(&RespondRequest {
            session_id: &session_id,
            text,
            choice,
            target: choice,
        });
        let response = self.round_trip(paths::RESPOND, body).await?;
        self.hydrate_value(response)?;
        self.inputs.clear_statements();
        Ok(())
    }

    /// Cast the round-table vote. An empty target is a silent no-op (the
    /// view disables the control until a target is picked).
    pub async fn vote(&mut self, target: &PlayerId) -> Result<(), ClientError> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(());
        };
        if self.busy || target.is_empty() {
            return Ok(());
        }

        self.signals.emit(UiSignal::VoteCast {
            target: target.clone(),
        });

        let body = encode(&VoteRequest {
            session_id: &session_id,
            target,
        });
        let response = self.round_trip(paths::VOTE, body).await?;
        self.hydrate_value(response)?;
        self.inputs.vote_target = None;
        Ok(())
    }

    /// Drive one of the legacy per-phase endpoints directly.
    ///
    /// Hydrates from the outcome's `state` payload when the response carries
    /// one (older responses put the snapshot fields at the top level, which
    /// is also accepted) and hands the side channels back to the caller.
    pub async fn phase_action(
        &mut self,
        endpoint: PhaseEndpoint,
        mut request: PhaseRequest,
    ) -> Result<PhaseOutcome, ClientError> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(PhaseOutcome::default());
        };
        if self.busy {
            return Ok(PhaseOutcome::default());
        }

        request.session_id = Some(session_id);
        let response = self.round_trip(endpoint.path(), encode(&request)).await?;

        let outcome: PhaseOutcome = serde_json::from_value(response.clone())
            .map_err(|e| self.record_remote(format!("malformed response: {e}")))?;
        if let Some(state) = outcome.state.clone() {
            self.apply_payload(state);
        } else if response.get("scene").is_some() {
            if let Ok(payload) = serde_json::from_value::<SnapshotPayload>(response) {
                self.apply_payload(payload);
            }
        }
        Ok(outcome)
    }

    /// Discard the session and restore the documented initial state.
    /// Local only; the service has no teardown endpoint.
    pub fn reset(&mut self) {
        self.snapshot.reset();
        self.session_id = None;
        self.inputs.clear_all();
        self.busy = false;
    }

    /// The single suspension point: one POST round trip, busy for exactly
    /// its duration regardless of outcome.
    async fn round_trip(
        &mut self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        log::debug!("dispatching POST {path}");
        self.busy = true;
        let result = self.transport.post_json(path, body).await;
        self.busy = false;

        result.map_err(|e| {
            log::warn!("POST {path} failed: {e}");
            self.record_remote(e.to_string())
        })
    }

    fn record_remote(&mut self, message: String) -> ClientError {
        self.snapshot.set_error(&message);
        ClientError::remote(message)
    }

    fn hydrate_value(&mut self, response: serde_json::Value) -> Result<(), ClientError> {
        let payload: SnapshotPayload = serde_json::from_value(response)
            .map_err(|e| self.record_remote(format!("malformed response: {e}")))?;
        self.apply_payload(payload);
        Ok(())
    }

    /// Hydrate transition plus the signals it implies
    fn apply_payload(&mut self, payload: SnapshotPayload) {
        let previous_scene = self.snapshot.scene.clone();
        let previous_item = self.snapshot.current_item.clone();
        let was_started = self.snapshot.started;

        if self.session_id.is_none() {
            if let Some(id) = payload.session_id.clone().filter(|id| !id.is_empty()) {
                self.session_id = Some(id);
            }
        }
        self.snapshot.hydrate(payload);

        if !was_started || previous_scene != self.snapshot.scene {
            self.signals.emit(UiSignal::PhaseEntered {
                scene: self.snapshot.scene.clone(),
                phase: self.snapshot.phase(),
            });
        }
        if let Some(item) = self.snapshot.current_item() {
            if previous_item.as_ref() != Some(item) {
                self.signals.emit(UiSignal::LineStarted {
                    item_type: item.type_name().to_string(),
                    speaker: item.speaker().map(str::to_string),
                    text: item.text().map(str::to_string),
                });
            }
        }
    }
}
