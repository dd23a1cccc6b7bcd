//! UI signal side channel.
//!
//! Pure notification hooks for decorative layers (scene transitions, sprite
//! animation, analytics). Nothing in the session depends on a sink receiving
//! them; the default sink drops everything.

use crate::domain::phase::Phase;
use crate::domain::value_objects::{PlayerId, Scene};
use std::sync::Mutex;

/// Notification emitted around dispatches and hydrates
#[derive(Debug, Clone, PartialEq)]
pub enum UiSignal {
    /// The snapshot landed on a different scene
    PhaseEntered { scene: Scene, phase: Phase },
    /// A new queue item became current
    LineStarted {
        item_type: String,
        speaker: Option<String>,
        text: Option<String>,
    },
    /// The current item is about to be advanced past
    LineEnded {
        item_type: String,
        speaker: Option<String>,
    },
    /// A vote round trip is about to start
    VoteCast { target: PlayerId },
}

/// Receiver for [`UiSignal`] notifications
pub trait SignalSink: Send + Sync {
    fn emit(&self, signal: UiSignal);
}

/// Sink that drops every signal; the default
#[derive(Debug, Default)]
pub struct NullSignalSink;

impl SignalSink for NullSignalSink {
    fn emit(&self, _signal: UiSignal) {}
}

/// Sink that records every signal, for tests and debugging
#[derive(Debug, Default)]
pub struct RecordingSignalSink {
    signals: Mutex<Vec<UiSignal>>,
}

impl RecordingSignalSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn recorded(&self) -> Vec<UiSignal> {
        self.signals.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl SignalSink for RecordingSignalSink {
    fn emit(&self, signal: UiSignal) {
        if let Ok(mut signals) = self.signals.lock() {
            signals.push(signal);
        }
    }
}
