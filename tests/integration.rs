// Integration tests (native) for the `shadow-match` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use proptest::prelude::*;

use shadow_match::audio::AudioRequest;
use shadow_match::geometry::overlap_percentage;
use shadow_match::layout::{DEFAULT_VIEWPORT, Viewport};
use shadow_match::matcher::{Candidate, Detection};
use shadow_match::progression::MatchRecord;
use shadow_match::rng::Lcg;
use shadow_match::{Command, Deferred, Game, GameConfig, MatchDetector, Point, Progression, Rect, Screen};

fn game(shuffle: bool, seed: u64) -> Game {
    let cfg = GameConfig {
        shuffle,
        ..GameConfig::default()
    };
    Game::new(cfg, DEFAULT_VIEWPORT, Lcg::new(seed)).expect("valid config")
}

fn finish_seq(cmds: &[Command]) -> Option<u64> {
    cmds.iter().find_map(|c| match c {
        Command::Schedule {
            action: Deferred::FinishFeedback(seq),
            ..
        } => Some(*seq),
        _ => None,
    })
}

/// Drag the current item onto its own shadow and return the drop commands.
fn drop_current_on_own_shadow(g: &mut Game) -> Vec<Command> {
    let s = g.session().expect("session");
    let id = s.current_item().id;
    let home = s.draggable_rect().expect("draggable visible");
    let target = s.candidates().find(|c| c.id == id).expect("target").rect;
    g.pointer_down(home.center());
    g.pointer_move(target.center());
    g.pointer_up(target.center())
}

#[test]
fn full_round_from_home_to_celebration() {
    let mut g = game(true, 99);
    let card = g.home_layout().cards[0];
    let cmds = g.pointer_down(card.center());
    assert_eq!(
        cmds,
        vec![Command::Schedule {
            delay_ms: 200,
            action: Deferred::StartTopic("animals")
        }]
    );
    g.run_deferred(Deferred::StartTopic("animals"));
    assert_eq!(g.screen(), Screen::Playing);

    let n = g.session().expect("session").topic().items.len();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..n {
        seen.insert(g.session().expect("session").current_item().id);
        let cmds = drop_current_on_own_shadow(&mut g);
        assert!(matches!(cmds[0], Command::Play(AudioRequest::Clip { .. })));
        assert!(cmds.iter().any(|c| matches!(
            c,
            Command::Schedule {
                delay_ms: 500,
                action: Deferred::Play(_)
            }
        )));
        let seq = finish_seq(&cmds).expect("feedback window");
        let follow = g.run_deferred(Deferred::FinishFeedback(seq));
        if g.screen() == Screen::Celebration {
            assert_eq!(
                follow,
                vec![Command::Schedule {
                    delay_ms: 300,
                    action: Deferred::RevealCelebration
                }]
            );
        }
    }
    // Each item is asked for exactly once per round.
    assert_eq!(seen.len(), n);
    assert_eq!(g.screen(), Screen::Celebration);
    assert!(g.session().expect("session").progression().is_complete());

    // Play Again only responds once revealed.
    let play_again = g.celebration_layout().play_again;
    g.pointer_down(play_again.center());
    assert_eq!(g.screen(), Screen::Celebration);
    g.run_deferred(Deferred::RevealCelebration);
    g.pointer_down(play_again.center());
    assert_eq!(g.screen(), Screen::Playing);
    let p = g.session().expect("session").progression();
    assert_eq!(p.level(), 0);
    assert_eq!(p.matched_count(), 0);
}

#[test]
fn wrong_drop_keeps_level_and_plays_hit() {
    let mut g = game(false, 3);
    g.start_topic("fruits").expect("fruits");
    let s = g.session().expect("session");
    let id = s.current_item().id;
    let home = s.draggable_rect().expect("home");
    let wrong = s.candidates().find(|c| c.id != id).expect("other").rect;
    g.pointer_down(home.center());
    let cmds = g.pointer_up(wrong.center());
    assert_eq!(
        cmds[0],
        Command::Play(AudioRequest::Clip {
            src: "/sounds/hit.mp3".into(),
            volume: 0.3,
            fallback_speech: None
        })
    );
    assert_eq!(g.session().expect("session").progression().level(), 0);
}

#[test]
fn stale_feedback_after_going_home_is_harmless() {
    let mut g = game(false, 8);
    g.start_topic("vehicles").expect("vehicles");
    let cmds = drop_current_on_own_shadow(&mut g);
    let seq = finish_seq(&cmds).expect("feedback window");
    let back = g.session().expect("session").layout().back_button;
    g.pointer_down(back.center());
    assert_eq!(g.screen(), Screen::Home);
    assert!(g.run_deferred(Deferred::FinishFeedback(seq)).is_empty());
    assert_eq!(g.screen(), Screen::Home);
}

#[test]
fn muted_game_schedules_no_sound() {
    let mut g = game(false, 4);
    let toggle = g.home_layout().sound_toggle;
    g.pointer_down(toggle.center());
    g.start_topic("shapes").expect("shapes");
    let cmds = drop_current_on_own_shadow(&mut g);
    assert_eq!(cmds.len(), 1);
    assert!(finish_seq(&cmds).is_some());
}

#[test]
fn config_json_round_trip_into_game() {
    let cfg = GameConfig::from_json(r#"{"overlap_threshold": 50, "start_topic": "animals"}"#)
        .expect("config");
    let g = Game::new(cfg, Viewport::new(1280.0, 800.0), Lcg::new(1)).expect("game");
    assert_eq!(g.screen(), Screen::Playing);
    assert!(GameConfig::from_json(r#"{"overlap_threshold": 0}"#).is_err());
    assert!(GameConfig::from_json(r#"{"start_topic": "planets"}"#).is_err());
}

#[test]
fn unusable_viewport_falls_back_to_default() {
    let g = Game::new(GameConfig::default(), Viewport::new(0.0, 0.0), Lcg::new(1)).expect("game");
    assert_eq!(g.viewport(), DEFAULT_VIEWPORT);
}

#[test]
fn js_overlap_export_matches_geometry() {
    let pct = shadow_match::overlap_percentage_js(0.0, 0.0, 100.0, 100.0, 50.0, 0.0, 100.0, 100.0);
    assert_eq!(pct, 50.0);
}

proptest! {
    #[test]
    fn overlap_never_exceeds_bounds(
        ax in -500.0f64..500.0, ay in -500.0f64..500.0, aw in 0.0f64..300.0, ah in 0.0f64..300.0,
        bx in -500.0f64..500.0, by in -500.0f64..500.0, bw in 0.0f64..300.0, bh in 0.0f64..300.0,
    ) {
        let pct = overlap_percentage(&Rect::new(ax, ay, aw, ah), &Rect::new(bx, by, bw, bh));
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn detected_target_has_highest_overlap(dx in -150.0f64..150.0, dy in -150.0f64..150.0) {
        let targets: Vec<Rect> = (0..5)
            .map(|i| Rect::new(i as f64 * 160.0, 0.0, 144.0, 144.0))
            .collect();
        let ids = ["a", "b", "c", "d", "e"];
        let dragged = Rect::new(160.0 + dx, dy, 144.0, 144.0);
        let cands = ids.iter().zip(&targets).map(|(id, r)| Candidate { id: *id, rect: *r });
        match MatchDetector::default().detect(&dragged, cands) {
            Detection::Hit(hit) => {
                prop_assert!(hit.overlap >= 70.0);
                for r in &targets {
                    prop_assert!(overlap_percentage(&dragged, r) <= hit.overlap);
                }
            }
            Detection::NoMatch => {
                for r in &targets {
                    prop_assert!(overlap_percentage(&dragged, r) < 70.0);
                }
            }
        }
    }

    #[test]
    fn level_stays_in_range(count in 1usize..12, misses in proptest::collection::vec(0u8..3, 0..40)) {
        let ids: Vec<String> = (0..count).map(|i| format!("item{i}")).collect();
        let mut p = Progression::new(ids.clone());
        for m in misses {
            if m == 0 {
                let id = &ids[p.current_index()];
                if let MatchRecord::Completed = p.record_match(id) {
                    prop_assert!(p.is_complete());
                }
            } else {
                p.record_miss();
            }
            prop_assert!(p.level() < count);
            prop_assert!(p.matched_count() <= count);
        }
    }
}

#[test]
fn hover_and_drop_pick_same_point() {
    // Dropping exactly onto a target counts even after moving over neighbours.
    let mut g = game(false, 12);
    g.start_topic("animals").expect("animals");
    let s = g.session().expect("session");
    let id = s.current_item().id;
    let home = s.draggable_rect().expect("home");
    let target = s.candidates().find(|c| c.id == id).expect("target").rect;
    g.pointer_down(home.center());
    g.pointer_move(Point::new(10.0, 10.0));
    g.pointer_move(target.center());
    assert_eq!(
        g.session().and_then(|s| s.drag()).and_then(|d| d.hovered),
        Some(id)
    );
    let cmds = g.pointer_up(target.center());
    assert!(finish_seq(&cmds).is_some());
    assert!(g.session().expect("session").is_matched(id));
}
