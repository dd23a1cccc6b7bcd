//! Scene-to-phase mapping - folds the server's fine-grained scenes into the
//! coarse visual phases the presentation layer renders.

use crate::domain::value_objects::Scene;
use serde::{Deserialize, Serialize};

/// Client-side coarse visual grouping of scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Castle grounds / breakfast; also the fallback for unknown scenes
    Day,
    Parlor,
    Roundtable,
    Vote,
    Night,
    MorningReveal,
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Day => "day",
            Phase::Parlor => "parlor",
            Phase::Roundtable => "roundtable",
            Phase::Vote => "vote",
            Phase::Night => "night",
            Phase::MorningReveal => "morning-reveal",
            Phase::Ended => "ended",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a server scene onto the phase that should be on screen.
///
/// Total and deterministic: several scenes share a phase, and anything the
/// client does not recognize falls back to [`Phase::Day`] so the view always
/// has a defined phase to render.
pub fn scene_to_phase(scene: &Scene) -> Phase {
    match scene.as_str() {
        "DAY_PARLOR_OPEN" | "DAY_PARLOR_PLAYER_TURN" => Phase::Parlor,
        "ROUNDTABLE_OPEN" | "ROUNDTABLE_PLAYER_TURN" => Phase::Roundtable,
        "VOTE_PROMPT" | "VOTE_REVEAL" => Phase::Vote,
        "TURRET_PROMPT" => Phase::Night,
        "MORNING_REVEAL" => Phase::MorningReveal,
        "ENDED" => Phase::Ended,
        _ => Phase::Day,
    }
}
