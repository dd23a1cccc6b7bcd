//! Domain value objects - Immutable identifiers and enumerations of the game session

use serde::{Deserialize, Serialize};

/// Macro to implement common traits for string wrapper types
macro_rules! impl_string_wrapper {
    ($type:ident) => {
        impl $type {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $type {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $type {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Opaque session handle returned by the start action and echoed on every
/// subsequent request. Discarded on reset; there is no server-side teardown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionId(String);

impl_string_wrapper!(SessionId);

/// Public identifier of a player (human or AI) in the roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerId(String);

impl_string_wrapper!(PlayerId);

/// Server-side fine-grained state identifier.
///
/// The enumeration is owned by the remote service and grows without notice,
/// so scenes stay open-ended strings; [`scene_to_phase`] folds them into the
/// coarse visual phases this client knows about.
///
/// [`scene_to_phase`]: crate::domain::phase::scene_to_phase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scene(String);

impl_string_wrapper!(Scene);

impl Scene {
    /// Pre-game scene the client starts in before the first hydrate.
    pub const SETUP: &'static str = "setup";

    pub fn setup() -> Self {
        Self(Self::SETUP.to_string())
    }

    pub fn is_setup(&self) -> bool {
        self.0 == Self::SETUP
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::setup()
    }
}

/// Whether the engine is ready to advance or waiting on input.
///
/// Like [`Scene`], the value set belongs to the server; only the
/// ready-to-advance marker is interpreted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState(String);

impl_string_wrapper!(TurnState);

impl TurnState {
    pub const READY_TO_ADVANCE: &'static str = "READY_TO_ADVANCE";

    pub fn is_ready_to_advance(&self) -> bool {
        self.0 == Self::READY_TO_ADVANCE
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self(Self::READY_TO_ADVANCE.to_string())
    }
}

/// Action names the server advertises in `allowed_actions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Advance,
    Respond,
    Vote,
    /// Any action name this client does not recognize
    Other,
}

// Hand-written so that unrecognized action names decode to `Other` instead
// of failing the whole payload.
impl<'de> Deserialize<'de> for ActionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "advance" => ActionKind::Advance,
            "respond" => ActionKind::Respond,
            "vote" => ActionKind::Vote,
            _ => ActionKind::Other,
        })
    }
}
