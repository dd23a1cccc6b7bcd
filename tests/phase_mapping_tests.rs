//! Scene-to-phase mapping coverage: the mapping must be total and
//! deterministic so the view always has a defined phase to render.

use traitors_client::{scene_to_phase, Phase, Scene};

#[test]
fn known_scene_mapping_table() {
    let table = [
        ("DAY_PARLOR_OPEN", Phase::Parlor),
        ("DAY_PARLOR_PLAYER_TURN", Phase::Parlor),
        ("ROUNDTABLE_OPEN", Phase::Roundtable),
        ("ROUNDTABLE_PLAYER_TURN", Phase::Roundtable),
        ("VOTE_PROMPT", Phase::Vote),
        ("VOTE_REVEAL", Phase::Vote),
        ("TURRET_PROMPT", Phase::Night),
        ("MORNING_REVEAL", Phase::MorningReveal),
        ("ENDED", Phase::Ended),
    ];

    for (scene, expected) in table {
        assert_eq!(
            scene_to_phase(&Scene::from(scene)),
            expected,
            "scene {scene} mapped wrong"
        );
    }
}

#[test]
fn unmapped_scenes_fall_back_to_day() {
    for scene in ["BREAKFAST_OPEN", "setup", "", "ended", "vote_prompt", "LIBRARY"] {
        assert_eq!(scene_to_phase(&Scene::from(scene)), Phase::Day);
    }
}

#[test]
fn mapping_is_deterministic() {
    let scene = Scene::from("TURRET_PROMPT");
    let first = scene_to_phase(&scene);
    for _ in 0..100 {
        assert_eq!(scene_to_phase(&scene), first);
    }
}

#[test]
fn phase_labels_match_the_wire_spelling() {
    assert_eq!(Phase::MorningReveal.to_string(), "morning-reveal");
    assert_eq!(Phase::Day.as_str(), "day");
    assert_eq!(
        serde_json::to_string(&Phase::MorningReveal).unwrap(),
        "\"morning-reveal\""
    );
}
