//! Dispatcher round-trip coverage against a scripted transport: precondition
//! short-circuits, error preservation, input clearing and the signal side
//! channel.

use serde_json::json;
use std::sync::Arc;
use traitors_client::{
    ClientError, GameSession, GameTransport, Phase, PhaseEndpoint, PhaseRequest, PlayerId,
    RecordingSignalSink, ScriptedTransport, SignalSink, UiSignal,
};

fn start_body() -> serde_json::Value {
    json!({
        "session_id": "s1",
        "scene": "DAY_PARLOR_OPEN",
        "turn_state": "READY_TO_ADVANCE",
        "queue": [{"type": "host_line", "text": "Welcome"}],
        "queue_index": 0,
        "current_item": {"type": "host_line", "text": "Welcome"},
        "allowed_actions": ["advance"],
        "players_public": [
            {"id": "human", "name": "Ada", "alive": true, "isHuman": true},
            {"id": "p1", "name": "Verity", "alive": true},
            {"id": "p2", "name": "Silas", "alive": true},
            {"id": "p3", "name": "Marion", "alive": true},
            {"id": "p4", "name": "Edwin", "alive": true},
            {"id": "p5", "name": "Tabitha", "alive": true},
            {"id": "p6", "name": "Rufus", "alive": true}
        ],
        "meta": {"round": 1, "alive_count": 7}
    })
}

async fn started_session(transport: &Arc<ScriptedTransport>) -> GameSession {
    transport.push_ok(start_body());
    let mut session = GameSession::new(Arc::clone(transport) as Arc<dyn GameTransport>);
    session.start("Ada", 6).await.unwrap();
    session
}

#[tokio::test]
async fn start_scenario_hydrates_phase_session_and_item() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = started_session(&transport).await;

    assert_eq!(session.phase(), Phase::Parlor);
    assert_eq!(session.session_id().unwrap().as_str(), "s1");
    assert_eq!(
        session.snapshot().current_item().unwrap().type_name(),
        "host_line"
    );
    assert_eq!(session.snapshot().players.len(), 7);
    assert_eq!(session.snapshot().meta.round, 1);

    let call = transport.last_call().unwrap();
    assert_eq!(call.path, "/traitors/start");
    assert_eq!(call.body, json!({"human_name": "Ada", "ai_count": 6}));
}

#[tokio::test]
async fn restart_adopts_the_new_session_handle() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;
    assert_eq!(session.session_id().unwrap().as_str(), "s1");

    let mut body = start_body();
    body["session_id"] = json!("s2");
    transport.push_ok(body);
    session.start("Ada", 6).await.unwrap();

    assert_eq!(session.session_id().unwrap().as_str(), "s2");

    // Later actions target the new game, not the abandoned one
    transport.push_ok(json!({"scene": "ROUNDTABLE_OPEN"}));
    session.advance().await.unwrap();
    assert_eq!(
        transport.last_call().unwrap().body,
        json!({"session_id": "s2"})
    );
}

#[tokio::test]
async fn vote_without_session_makes_no_call_and_changes_nothing() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = GameSession::new(Arc::clone(&transport) as Arc<dyn GameTransport>);
    let before = session.snapshot().clone();

    session.vote(&PlayerId::from("p3")).await.unwrap();

    assert_eq!(transport.call_count(), 0);
    assert_eq!(session.snapshot(), &before);
    assert_eq!(session.error(), None);
}

#[tokio::test]
async fn transport_failure_preserves_the_last_known_good_snapshot() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;
    let before = session.snapshot().clone();

    transport.push_http_error("No such session");
    let result = session.advance().await;

    assert!(matches!(result, Err(ClientError::Remote(_))));
    assert_eq!(session.error(), Some("No such session"));
    assert!(!session.busy());

    // Every field except the error equals its pre-call value
    let mut after = session.snapshot().clone();
    after.error = None;
    assert_eq!(after, before);
}

#[tokio::test]
async fn advance_echoes_the_session_handle() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;

    transport.push_ok(json!({"scene": "ROUNDTABLE_OPEN"}));
    session.advance().await.unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(call.path, "/traitors/advance");
    assert_eq!(call.body, json!({"session_id": "s1"}));
    assert_eq!(session.phase(), Phase::Roundtable);
}

#[tokio::test]
async fn respond_mirrors_choice_into_target_and_clears_inputs() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;
    session.inputs_mut().day_statement = "I slept well.".to_string();
    session.inputs_mut().murder_target = Some(PlayerId::from("p5"));

    transport.push_ok(json!({"scene": "TURRET_PROMPT"}));
    session.respond("", Some("p5")).await.unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(
        call.body,
        json!({"session_id": "s1", "text": "", "choice": "p5", "target": "p5"})
    );
    assert!(session.inputs().day_statement.is_empty());
    assert_eq!(session.inputs().murder_target, None);
}

#[tokio::test]
async fn vote_clears_the_vote_target_on_success() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;
    session.inputs_mut().vote_target = Some(PlayerId::from("p3"));

    transport.push_ok(json!({"scene": "VOTE_REVEAL"}));
    session.vote(&PlayerId::from("p3")).await.unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(call.path, "/traitors/vote");
    assert_eq!(call.body, json!({"session_id": "s1", "target": "p3"}));
    assert_eq!(session.inputs().vote_target, None);
}

#[tokio::test]
async fn failed_respond_keeps_pending_inputs() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;
    session.inputs_mut().roundtable_statement = "It was Silas.".to_string();

    transport.push_http_error("engine busy");
    let _ = session.respond("It was Silas.", None).await;

    assert_eq!(session.inputs().roundtable_statement, "It was Silas.");
}

#[tokio::test]
async fn reset_discards_session_inputs_and_error() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;
    session.inputs_mut().vote_target = Some(PlayerId::from("p1"));
    transport.push_http_error("boom");
    let _ = session.advance().await;

    session.reset();

    assert_eq!(session.session_id(), None);
    assert_eq!(session.phase(), Phase::Day);
    assert!(session.snapshot().scene.is_setup());
    assert_eq!(session.error(), None);
    assert_eq!(session.inputs().vote_target, None);
    assert!(!session.snapshot().started);

    // Dispatches after reset are no-ops until a new start
    session.advance().await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn signals_trace_the_session_lifecycle() {
    let transport = Arc::new(ScriptedTransport::new());
    let sink = Arc::new(RecordingSignalSink::new());
    transport.push_ok(start_body());
    let mut session = GameSession::new(Arc::clone(&transport) as Arc<dyn GameTransport>)
        .with_signal_sink(Arc::clone(&sink) as Arc<dyn SignalSink>);
    session.start("Ada", 6).await.unwrap();

    transport.push_ok(json!({
        "scene": "DAY_PARLOR_OPEN",
        "current_item": {"type": "ai_line", "speaker_id": "p1", "speaker_name": "Verity", "text": "Lovely morning."}
    }));
    session.advance().await.unwrap();

    transport.push_ok(json!({"scene": "VOTE_REVEAL"}));
    session.vote(&PlayerId::from("p2")).await.unwrap();

    let signals = sink.recorded();
    assert!(signals.iter().any(|s| matches!(
        s,
        UiSignal::PhaseEntered { phase: Phase::Parlor, .. }
    )));
    assert!(signals.iter().any(
        |s| matches!(s, UiSignal::LineStarted { item_type, .. } if item_type == "host_line")
    ));
    assert!(signals.iter().any(
        |s| matches!(s, UiSignal::LineEnded { item_type, .. } if item_type == "host_line")
    ));
    assert!(signals
        .iter()
        .any(|s| matches!(s, UiSignal::VoteCast { target } if target.as_str() == "p2")));
}

#[tokio::test]
async fn phase_action_hydrates_state_and_returns_side_channels() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;

    transport.push_ok(json!({
        "state": {
            "scene": "MORNING_REVEAL",
            "meta": {"round": 2, "last_murdered": "p4"}
        },
        "ai_turns": [{"id": "p1", "name": "Verity", "text": "I heard footsteps."}],
        "host_line": "One chair stands empty.",
        "murdered": "p4"
    }));
    let outcome = session
        .phase_action(PhaseEndpoint::Night, PhaseRequest::new().with_target("p4"))
        .await
        .unwrap();

    assert_eq!(session.phase(), Phase::MorningReveal);
    assert_eq!(session.snapshot().meta.last_murdered, Some(PlayerId::from("p4")));
    assert_eq!(outcome.murdered, Some(PlayerId::from("p4")));
    assert_eq!(outcome.host_line.as_deref(), Some("One chair stands empty."));
    assert_eq!(outcome.ai_turns.len(), 1);

    let call = transport.last_call().unwrap();
    assert_eq!(call.path, "/traitors/night");
    assert_eq!(call.body, json!({"session_id": "s1", "target": "p4"}));
}

#[tokio::test]
async fn phase_action_accepts_top_level_snapshot_responses() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = started_session(&transport).await;

    transport.push_ok(json!({
        "scene": "ROUNDTABLE_OPEN",
        "ai_turns": [{"id": "p2", "text": "Accusations already?"}]
    }));
    let outcome = session
        .phase_action(PhaseEndpoint::RoundtableOpen, PhaseRequest::new())
        .await
        .unwrap();

    assert_eq!(session.phase(), Phase::Roundtable);
    assert_eq!(outcome.ai_turns.len(), 1);
}

#[tokio::test]
async fn phase_action_without_session_is_a_no_op() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = GameSession::new(Arc::clone(&transport) as Arc<dyn GameTransport>);

    let outcome = session
        .phase_action(PhaseEndpoint::Day, PhaseRequest::new().with_text("hello"))
        .await
        .unwrap();

    assert_eq!(transport.call_count(), 0);
    assert_eq!(outcome.ai_turns.len(), 0);
    assert_eq!(outcome.host_line, None);
}
