//! Session/turn state store - the last-known server-reported game state and
//! the hydrate transition that replaces it.

use crate::domain::phase::{scene_to_phase, Phase};
use crate::domain::value_objects::{ActionKind, PlayerId, Scene, SessionId, TurnState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize an array field defensively: missing, null or non-array values
/// become the empty vector, and elements that fail to decode are dropped.
/// The store must never hand the view a non-iterable.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// The kind of input a `player_prompt` item solicits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    DayStatement,
    ParlorStatement,
    RoundtableStatement,
    MurderTarget,
    EndgameChoice,
    /// Prompt kinds this client does not recognize; rendered generically
    Other,
}

impl Default for PromptKind {
    fn default() -> Self {
        PromptKind::Other
    }
}

impl<'de> Deserialize<'de> for PromptKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(match kind.as_str() {
            "day_statement" => PromptKind::DayStatement,
            "parlor_statement" => PromptKind::ParlorStatement,
            "roundtable_statement" => PromptKind::RoundtableStatement,
            "murder_target" => PromptKind::MurderTarget,
            "endgame_choice" => PromptKind::EndgameChoice,
            _ => PromptKind::Other,
        })
    }
}

/// One selectable option attached to a prompt or vote item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// A narrative queue item, tagged by its `type` field.
///
/// Exactly one item is active at a time and it fully determines which input
/// control set the view shows. Tags this client does not know decode to
/// [`QueueItem::Unknown`] so a newer server cannot break rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueItem {
    HostLine {
        #[serde(default)]
        text: String,
    },
    AiLine {
        #[serde(default)]
        speaker_id: Option<PlayerId>,
        #[serde(default)]
        speaker_name: Option<String>,
        #[serde(default)]
        text: String,
    },
    PlayerLine {
        #[serde(default)]
        text: String,
    },
    PhaseTransition {
        #[serde(default)]
        to_scene: Option<Scene>,
    },
    PlayerPrompt {
        #[serde(default)]
        prompt_kind: PromptKind,
        #[serde(default)]
        prompt: String,
        #[serde(default, deserialize_with = "lenient_vec")]
        options: Vec<ChoiceOption>,
    },
    VotePrompt {
        #[serde(default)]
        prompt: String,
        #[serde(default, deserialize_with = "lenient_vec")]
        options: Vec<ChoiceOption>,
    },
    ResultReveal {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Unknown,
}

const NO_OPTIONS: &[ChoiceOption] = &[];

impl QueueItem {
    /// The wire tag of this item, for signals and logging
    pub fn type_name(&self) -> &'static str {
        match self {
            QueueItem::HostLine { .. } => "host_line",
            QueueItem::AiLine { .. } => "ai_line",
            QueueItem::PlayerLine { .. } => "player_line",
            QueueItem::PhaseTransition { .. } => "phase_transition",
            QueueItem::PlayerPrompt { .. } => "player_prompt",
            QueueItem::VotePrompt { .. } => "vote_prompt",
            QueueItem::ResultReveal { .. } => "result_reveal",
            QueueItem::Unknown => "unknown",
        }
    }

    /// Display name of whoever speaks this item, if anyone
    pub fn speaker(&self) -> Option<&str> {
        match self {
            QueueItem::HostLine { .. } => Some("Host"),
            QueueItem::AiLine {
                speaker_name,
                speaker_id,
                ..
            } => speaker_name
                .as_deref()
                .or_else(|| speaker_id.as_ref().map(PlayerId::as_str)),
            _ => None,
        }
    }

    /// Narrative text carried by this item, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            QueueItem::HostLine { text }
            | QueueItem::AiLine { text, .. }
            | QueueItem::PlayerLine { text }
            | QueueItem::ResultReveal { text } => Some(text),
            _ => None,
        }
    }

    /// Selectable options of a prompt or vote item (empty otherwise)
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            QueueItem::PlayerPrompt { options, .. } | QueueItem::VotePrompt { options, .. } => {
                options
            }
            _ => NO_OPTIONS,
        }
    }
}

/// Player-public roster record.
///
/// Read-only projection from the server; the client never mutates a record,
/// only replaces the whole roster on hydrate. Field spellings accept both
/// the camelCase the live service emits and snake_case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerPublic {
    #[serde(default)]
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alive: bool,
    #[serde(default, alias = "isHuman")]
    pub is_human: bool,
    #[serde(default, alias = "modelLabel")]
    pub model_label: Option<String>,
    #[serde(default, alias = "modelTier")]
    pub model_tier: Option<String>,
}

fn default_round() -> u32 {
    1
}

/// Round metadata reported alongside the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundMeta {
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default)]
    pub alive_count: u32,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub last_murdered: Option<PlayerId>,
    #[serde(default)]
    pub parlor_partner_id: Option<PlayerId>,
}

impl Default for RoundMeta {
    fn default() -> Self {
        Self {
            round: 1,
            alive_count: 0,
            winner: None,
            last_murdered: None,
            parlor_partner_id: None,
        }
    }
}

/// Wire shape of every successful action response.
///
/// Everything is optional; the hydrate transition decides per field whether
/// an absent value falls back or resets. The roster accepts both the
/// `players_public` and `players` spellings, which the service has used
/// interchangeably.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub scene: Option<Scene>,
    #[serde(default)]
    pub turn_state: Option<TurnState>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub queue: Vec<QueueItem>,
    #[serde(default)]
    pub queue_index: Option<usize>,
    #[serde(default)]
    pub current_item: Option<QueueItem>,
    #[serde(default)]
    pub awaiting_player_input: bool,
    #[serde(default)]
    pub player_input_kind: Option<String>,
    #[serde(default)]
    pub pending_action: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub allowed_actions: Vec<ActionKind>,
    #[serde(default, alias = "players", deserialize_with = "lenient_vec")]
    pub players_public: Vec<PlayerPublic>,
    #[serde(default)]
    pub meta: Option<RoundMeta>,
}

/// Speaker/text pair of the line currently being voiced, for the stage view
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSpeech {
    pub player_id: PlayerId,
    pub text: String,
}

/// Roster id the view attributes human speech bubbles to
pub const HUMAN_SPEAKER_ID: &str = "human";

/// The complete server-reported game state as of the last successful action.
///
/// Written exclusively by [`GameSnapshot::hydrate`], which runs only inside a
/// dispatcher's success path; an error transition touches nothing but the
/// error field, so the last-known-good state survives a failed action.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub started: bool,
    pub scene: Scene,
    pub turn_state: TurnState,
    pub queue: Vec<QueueItem>,
    pub queue_index: usize,
    pub current_item: Option<QueueItem>,
    pub awaiting_player_input: bool,
    pub player_input_kind: Option<String>,
    pub pending_action: Option<String>,
    pub allowed_actions: Vec<ActionKind>,
    pub players: Vec<PlayerPublic>,
    pub meta: RoundMeta,
    pub parlor_partner_id: Option<PlayerId>,
    pub error: Option<String>,
}

impl GameSnapshot {
    /// The documented initial state: setup scene, empty roster, no error
    pub fn initial() -> Self {
        Self::default()
    }

    /// Merge a server payload into the snapshot.
    ///
    /// Scalar identity fields (`scene`, `turn_state`, `meta`) fall back to
    /// their previous values when the payload omits them; collections, the
    /// cursor and the input flags take the payload's value so a stale item
    /// can never outlive the response that superseded it. A successful
    /// hydrate also clears the error.
    pub fn hydrate(&mut self, payload: SnapshotPayload) {
        self.started = true;
        if let Some(scene) = payload.scene.filter(|s| !s.is_empty()) {
            self.scene = scene;
        }
        if let Some(turn_state) = payload.turn_state.filter(|t| !t.is_empty()) {
            self.turn_state = turn_state;
        }
        self.queue = payload.queue;
        self.queue_index = payload.queue_index.unwrap_or(0);
        self.current_item = payload.current_item;
        self.awaiting_player_input = payload.awaiting_player_input;
        self.player_input_kind = payload.player_input_kind;
        self.pending_action = payload.pending_action;
        self.allowed_actions = payload.allowed_actions;
        self.players = payload.players_public;
        if let Some(meta) = payload.meta {
            self.meta = meta;
        }
        self.parlor_partner_id = self.meta.parlor_partner_id.clone();
        self.error = None;
    }

    /// Error transition: set the single error value, leave game state alone
    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        });
    }

    /// Revert to the documented initial state
    pub fn reset(&mut self) {
        *self = Self::initial();
    }

    /// Coarse visual phase for the current scene
    pub fn phase(&self) -> Phase {
        scene_to_phase(&self.scene)
    }

    /// Whether the server currently allows the advance action
    pub fn can_advance(&self) -> bool {
        self.allowed_actions.contains(&ActionKind::Advance)
    }

    pub fn current_item(&self) -> Option<&QueueItem> {
        self.current_item.as_ref()
    }

    /// Roster entries still in the game
    pub fn alive_players(&self) -> impl Iterator<Item = &PlayerPublic> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Speech bubble for the current item, if it is a spoken line
    pub fn active_speech(&self) -> Option<ActiveSpeech> {
        match self.current_item.as_ref()? {
            QueueItem::AiLine {
                speaker_id, text, ..
            } => Some(ActiveSpeech {
                player_id: speaker_id.clone().unwrap_or_default(),
                text: text.clone(),
            }),
            QueueItem::PlayerLine { text } => Some(ActiveSpeech {
                player_id: PlayerId::from(HUMAN_SPEAKER_ID),
                text: text.clone(),
            }),
            _ => None,
        }
    }
}
