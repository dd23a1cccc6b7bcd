//! Wire contracts - request payloads and endpoint paths of the remote
//! game-orchestration service.
//!
//! The service's response contract is not fully pinned down (successive
//! front-end generations read slightly different shapes), so response types
//! here are best-effort: every field is optional and arrays decode leniently.

use crate::domain::snapshot::{lenient_vec, SnapshotPayload};
use crate::domain::value_objects::{PlayerId, SessionId};
use serde::{Deserialize, Serialize};

/// Endpoint paths on the fixed remote origin (POST only)
pub mod paths {
    pub const START: &str = "/traitors/start";
    pub const ADVANCE: &str = "/traitors/advance";
    pub const RESPOND: &str = "/traitors/respond";
    pub const VOTE: &str = "/traitors/vote";
}

/// Request body of `/traitors/start`
#[derive(Debug, Clone, Serialize)]
pub struct StartRequest<'a> {
    pub human_name: &'a str,
    pub ai_count: u32,
}

/// Request body of `/traitors/advance`
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceRequest<'a> {
    pub session_id: &'a SessionId,
}

/// Request body of `/traitors/respond`.
///
/// `target` mirrors `choice`; the service has read either name depending on
/// the prompt kind, so both are always sent.
#[derive(Debug, Clone, Serialize)]
pub struct RespondRequest<'a> {
    pub session_id: &'a SessionId,
    pub text: &'a str,
    pub choice: &'a str,
    pub target: &'a str,
}

/// Request body of `/traitors/vote`
#[derive(Debug, Clone, Serialize)]
pub struct VoteRequest<'a> {
    pub session_id: &'a SessionId,
    pub target: &'a PlayerId,
}

/// The legacy per-phase endpoints kept by the service for older front-ends.
///
/// Each drives one phase of the day/night loop directly instead of going
/// through the queue-driven `advance`/`respond` surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEndpoint {
    Day,
    DayOpen,
    Roundtable,
    RoundtableOpen,
    ParlorTurn,
    ParlorOpen,
    Night,
    EndgameVote,
}

impl PhaseEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            PhaseEndpoint::Day => "/traitors/day",
            PhaseEndpoint::DayOpen => "/traitors/day-open",
            PhaseEndpoint::Roundtable => "/traitors/roundtable",
            PhaseEndpoint::RoundtableOpen => "/traitors/roundtable-open",
            PhaseEndpoint::ParlorTurn => "/traitors/parlor-turn",
            PhaseEndpoint::ParlorOpen => "/traitors/parlor-open",
            PhaseEndpoint::Night => "/traitors/night",
            PhaseEndpoint::EndgameVote => "/traitors/endgame-vote",
        }
    }
}

impl std::fmt::Display for PhaseEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Request body of a [`PhaseEndpoint`]: the session handle plus whichever
/// phase-specific input applies. Absent fields are omitted from the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
}

impl PhaseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<PlayerId>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }
}

/// One AI table turn reported on a phase endpoint's side channel
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AiTurn {
    #[serde(default, alias = "id")]
    pub speaker_id: Option<PlayerId>,
    #[serde(default, alias = "speaker_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// One AI vote reported on a phase endpoint's side channel
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AiVote {
    #[serde(default, alias = "id")]
    pub voter: Option<PlayerId>,
    #[serde(default)]
    pub target: Option<PlayerId>,
}

/// One AI endgame choice reported on a phase endpoint's side channel
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AiChoice {
    #[serde(default, alias = "id")]
    pub player: Option<PlayerId>,
    #[serde(default)]
    pub choice: Option<String>,
}

/// Response of a [`PhaseEndpoint`]: an optional state payload to hydrate
/// from, side-channel arrays of AI activity, a narrative host line and the
/// round's outcome markers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhaseOutcome {
    #[serde(default)]
    pub state: Option<SnapshotPayload>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub ai_turns: Vec<AiTurn>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub ai_votes: Vec<AiVote>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub ai_choices: Vec<AiChoice>,
    #[serde(default)]
    pub host_line: Option<String>,
    #[serde(default)]
    pub murdered: Option<PlayerId>,
    #[serde(default)]
    pub banished: Option<PlayerId>,
    #[serde(default)]
    pub outcome: Option<String>,
}
