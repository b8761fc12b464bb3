//! End-to-end match tests driven through the public engine surface
//!
//! The scripted rink leaves every load and shot open until the test resolves
//! it, so each step of a match can be observed between transitions.

use curling_match::{
    collab::Collaborators,
    config::MatchSettings,
    core::{rink::TEE_Z, Difficulty, Side},
    game::{
        InputEvent, MatchEngine, MatchLogger, MatchOutcome, MatchStatus, PhaseTag, PointerEvent,
        VerbosityLevel,
    },
    sim::{CameraCall, FixedScoring, MemoryLeaderboard, RecordingCamera, ScriptedRink},
    CurlingError,
};
use similar_asserts::assert_eq;

const DT: f64 = 1.0 / 60.0;

struct Harness {
    engine: MatchEngine,
    rink: ScriptedRink,
    camera: RecordingCamera,
    board: MemoryLeaderboard,
}

impl Harness {
    fn new(settings: MatchSettings, scoring: FixedScoring) -> Self {
        let rink = ScriptedRink::new();
        let camera = RecordingCamera::new();
        let board = MemoryLeaderboard::new();
        let collaborators = Collaborators::new(
            Box::new(rink.clone()),
            Box::new(camera.clone()),
            Box::new(scoring),
            Box::new(board.clone()),
        );
        let mut logger = MatchLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        Harness {
            engine: MatchEngine::with_logger(Box::new(settings), collaborators, logger),
            rink,
            camera,
            board,
        }
    }

    fn active(&self) -> Option<PhaseTag> {
        self.engine.active_phase()
    }

    /// Load a piece, commit a shot for whichever side is up, and settle it
    fn play_turn(&mut self) -> Side {
        assert_eq!(self.active(), Some(PhaseTag::LoadingPiece));
        let side = self.engine.status().current_side();
        assert!(self.rink.resolve_load());
        self.engine.update(DT).unwrap();

        if self.active() == Some(PhaseTag::PlayerTurn) {
            assert_eq!(side, Side::A);
            self.engine.on_spacebar().unwrap();
            assert_eq!(self.active(), Some(PhaseTag::PlayerShooting));
        } else {
            assert_eq!(side, Side::B);
            assert_eq!(self.active(), Some(PhaseTag::ComputerShooting));
        }

        assert!(self.rink.resolve_shot(Some((0.0, TEE_Z))));
        self.engine.update(DT).unwrap();
        side
    }
}

fn settings(pieces: i64, sets: i64) -> MatchSettings {
    MatchSettings {
        difficulty: "normal".to_string(),
        pieces_per_side: pieces,
        sets_per_match: sets,
        seed: Some(7),
    }
}

fn turn_lines(side: Side, from: &str, to: &str) -> Vec<String> {
    let (turn, shooting) = match side {
        Side::A => ("PlayerTurn", "PlayerShooting"),
        _ => ("ComputerTurn", "ComputerShooting"),
    };
    vec![
        format!("{from} -> {turn}"),
        format!("{turn} -> {shooting}"),
        format!("{shooting} -> {to}"),
    ]
}

fn assert_conserved(status: &MatchStatus) {
    for side in [Side::A, Side::B] {
        assert_eq!(
            status.pieces_remaining(side) + status.pieces_used(side),
            status.initial_pieces(),
            "piece conservation broken for side {side}"
        );
    }
}

#[test]
fn test_single_set_match_sequence() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::new(vec![(2, 1)]));
    h.engine.start().unwrap();
    let first = h.engine.status().current_side();
    assert!(first.is_valid());

    let mut expected = vec!["-> Starting".to_string(), "Starting -> LoadingPiece".to_string()];
    let mut side = first;
    for turn in 0..16 {
        let to = if turn == 15 { "EndOfSet" } else { "LoadingPiece" };
        expected.extend(turn_lines(side, "LoadingPiece", to));
        assert_eq!(h.play_turn(), side);
        assert_conserved(h.engine.status());
        side = side.opponent();
    }
    expected.push("EndOfSet -> EndOfGame".to_string());

    assert_eq!(h.engine.logger().transitions(), expected);
    assert_eq!(h.active(), Some(PhaseTag::EndOfGame));
    assert_eq!(
        h.engine.outcome(),
        &MatchOutcome::Completed {
            score_a: 2,
            score_b: 1
        }
    );

    let status = h.engine.status();
    assert_eq!(status.score_a + status.score_b, 3);
    assert_eq!(status.current_set, 1);
    let records = h.board.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].concluded);
    assert_eq!(records[0].sets_played, 1);
}

#[test]
fn test_multi_set_scores_and_throw_order() {
    let scoring = FixedScoring::new(vec![(0, 1), (2, 0), (0, 0)]);
    let mut h = Harness::new(settings(2, 3), scoring);
    h.engine.start().unwrap();

    let mut previous = h.engine.status().clone();
    let mut set_starters = vec![h.engine.status().current_side()];
    while h.active() != Some(PhaseTag::EndOfGame) {
        let set_before = h.engine.status().current_set;
        h.play_turn();

        let status = h.engine.status().clone();
        assert!(status.score_a >= previous.score_a);
        assert!(status.score_b >= previous.score_b);
        assert!(status.current_set >= previous.current_set);
        assert_conserved(&status);
        if status.current_set != set_before && h.active() == Some(PhaseTag::LoadingPiece) {
            set_starters.push(status.current_side());
        }
        previous = status;
    }

    // B scored set 1 and throws first in set 2; A scored set 2
    assert_eq!(set_starters[1..].to_vec(), vec![Side::B, Side::A]);
    assert_eq!(
        h.engine.outcome(),
        &MatchOutcome::Completed {
            score_a: 2,
            score_b: 1
        }
    );

    let transitions = h.engine.logger().transitions();
    let set_ends = transitions.iter().filter(|t| t.ends_with("-> EndOfSet")).count();
    assert_eq!(set_ends, 3);
    assert_eq!(h.rink.clear_count(), 1 + 3);
}

#[test]
fn test_end_of_game_is_terminal() {
    let mut h = Harness::new(settings(1, 1), FixedScoring::new(vec![(1, 0)]));
    h.engine.start().unwrap();
    h.play_turn();
    h.play_turn();
    assert_eq!(h.active(), Some(PhaseTag::EndOfGame));

    let transitions = h.engine.transitions();
    let status = h.engine.status().clone();
    for _ in 0..10 {
        h.engine.update(DT).unwrap();
        h.engine.on_spacebar().unwrap();
        h.engine.on_pointer_down(PointerEvent::default()).unwrap();
    }
    assert_eq!(h.engine.transitions(), transitions);
    assert_eq!(h.engine.status(), &status);
    assert_eq!(h.rink.pending_loads(), 0);
}

#[test]
fn test_pointer_down_while_loading_is_ignored() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();
    assert_eq!(h.active(), Some(PhaseTag::LoadingPiece));

    let status = h.engine.status().clone();
    let transitions = h.engine.transitions();
    h.engine.on_pointer_down(PointerEvent::new(0.3, 0.0)).unwrap();

    assert_eq!(h.active(), Some(PhaseTag::LoadingPiece));
    assert_eq!(h.engine.status(), &status);
    assert_eq!(h.engine.transitions(), transitions);
}

#[test]
fn test_every_input_dropped_while_busy() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();
    let inputs = [
        InputEvent::PointerMove(PointerEvent::new(0.5, 0.1)),
        InputEvent::PointerDown(PointerEvent::default()),
        InputEvent::PointerUp(PointerEvent::default()),
        InputEvent::Spacebar,
        InputEvent::SpinToggle,
    ];

    for _ in 0..4 {
        let phase = h.active().unwrap();
        if phase.is_busy() && phase != PhaseTag::LoadingPiece {
            let status = h.engine.status().clone();
            let transitions = h.engine.transitions();
            let delivered = h.rink.delivered().len();
            for input in inputs {
                h.engine.dispatch(input).unwrap();
            }
            assert_eq!(h.active(), Some(phase));
            assert_eq!(h.engine.status(), &status);
            assert_eq!(h.engine.transitions(), transitions);
            assert_eq!(h.rink.delivered().len(), delivered);
        }

        // Walk the match forward one step at a time
        match phase {
            PhaseTag::LoadingPiece => {
                for input in inputs {
                    h.engine.dispatch(input).unwrap();
                }
                assert_eq!(h.active(), Some(PhaseTag::LoadingPiece));
                assert!(h.rink.resolve_load());
                h.engine.update(DT).unwrap();
            }
            PhaseTag::PlayerTurn => h.engine.on_spacebar().unwrap(),
            PhaseTag::PlayerShooting | PhaseTag::ComputerShooting => {
                assert!(h.rink.resolve_shot(Some((0.2, TEE_Z))));
                h.engine.update(DT).unwrap();
            }
            other => panic!("unexpected phase {other}"),
        }
    }
}

#[test]
fn test_hard_difficulty_installs_hard_strategy() {
    let mut h = Harness::new(
        MatchSettings {
            difficulty: "HARD".to_string(),
            ..settings(3, 1)
        },
        FixedScoring::default(),
    );
    h.engine.start().unwrap();
    assert_eq!(h.engine.computer_strategy_kind(), Some(Difficulty::Hard));

    let mut computer_shots = 0;
    while h.active() != Some(PhaseTag::EndOfGame) {
        if h.play_turn() == Side::B {
            computer_shots += 1;
            let shot = *h.rink.delivered().last().unwrap();
            assert!(shot.is_in_bounds(), "{shot}");
        }
    }
    assert_eq!(computer_shots, 3);
}

#[test]
fn test_second_start_is_rejected() {
    let mut h = Harness::new(settings(8, 2), FixedScoring::default());
    h.engine.start().unwrap();
    let status = h.engine.status().clone();
    let transitions = h.engine.logger().transitions();

    let err = h.engine.start().unwrap_err();
    assert!(matches!(err, CurlingError::AlreadyStarted));
    assert_eq!(h.engine.status(), &status);
    assert_eq!(h.engine.logger().transitions(), transitions);
    assert_eq!(h.engine.active_phase(), Some(PhaseTag::LoadingPiece));
    assert_eq!(h.rink.pending_loads(), 1);
    assert_eq!(h.engine.outcome(), &MatchOutcome::InProgress);
}

#[test]
fn test_load_resolving_after_stop_is_discarded() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();
    assert_eq!(h.rink.pending_loads(), 1);

    h.engine.stop();
    assert_eq!(h.active(), None);
    assert_eq!(h.engine.status(), &MatchStatus::new(8));

    assert!(!h.rink.resolve_load());
    h.engine.update(DT).unwrap();
    assert_eq!(h.engine.status(), &MatchStatus::new(8));
    assert_eq!(h.active(), None);
    assert!(h.rink.placed().is_empty());
}

#[test]
fn test_shot_resolving_after_stop_is_discarded() {
    let mut h = Harness::new(settings(4, 1), FixedScoring::new(vec![(1, 0)]));
    h.engine.start().unwrap();
    assert!(h.rink.resolve_load());
    h.engine.update(DT).unwrap();
    if h.active() == Some(PhaseTag::PlayerTurn) {
        h.engine.on_spacebar().unwrap();
    }
    assert!(matches!(
        h.active(),
        Some(PhaseTag::PlayerShooting) | Some(PhaseTag::ComputerShooting)
    ));
    assert_eq!(h.rink.pending_shots(), 1);

    h.engine.stop();
    assert_eq!(h.engine.outcome(), &MatchOutcome::Stopped);
    assert!(!h.rink.resolve_shot(Some((0.0, TEE_Z))));

    // Ticks and input after stop touch nothing
    h.engine.update(DT).unwrap();
    h.engine.on_spacebar().unwrap();
    h.engine.on_pointer_down(PointerEvent::default()).unwrap();
    assert_eq!(h.engine.status(), &MatchStatus::new(4));
    assert_eq!(h.active(), None);
    assert_eq!(h.rink.pending_loads(), 0);
    assert_eq!(h.rink.pending_shots(), 0);
    assert!(!h.board.last().unwrap().concluded);

    h.engine.start().unwrap();
    assert_eq!(h.active(), Some(PhaseTag::LoadingPiece));
    assert_eq!(h.engine.status().pieces_remaining(Side::A), 4);
    assert_eq!(h.engine.status().pieces_remaining(Side::B), 4);
}

#[test]
fn test_stale_load_from_previous_run_is_ignored() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();
    h.engine.stop();
    h.engine.start().unwrap();
    assert_eq!(h.rink.pending_loads(), 2);

    // The first queued load belongs to the stopped run
    assert!(!h.rink.resolve_load());
    h.engine.update(DT).unwrap();
    assert_eq!(h.active(), Some(PhaseTag::LoadingPiece));

    assert!(h.rink.resolve_load());
    h.engine.update(DT).unwrap();
    assert!(matches!(
        h.active(),
        Some(PhaseTag::PlayerTurn) | Some(PhaseTag::ComputerShooting)
    ));
    assert_eq!(h.rink.placed().len(), 1);
}

#[test]
fn test_stop_mid_match_records_unconcluded() {
    let mut h = Harness::new(settings(4, 2), FixedScoring::default());
    h.engine.start().unwrap();
    h.play_turn();
    h.engine.stop();

    assert_eq!(h.engine.outcome(), &MatchOutcome::Stopped);
    let record = h.board.last().unwrap();
    assert!(!record.concluded);
    assert_eq!(h.board.len(), 1);

    // Stopping again has nothing left to record
    h.engine.stop();
    assert_eq!(h.board.len(), 1);
}

#[test]
fn test_shot_failure_aborts_match() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();
    assert!(h.rink.resolve_load());
    h.engine.update(DT).unwrap();
    if h.active() == Some(PhaseTag::PlayerTurn) {
        h.engine.on_spacebar().unwrap();
    }
    assert!(h.engine.is_busy());

    assert!(h.rink.fail_shot("physics diverged"));
    let err = h.engine.update(DT).unwrap_err();
    assert!(matches!(err, CurlingError::Collaborator(_)));

    assert_eq!(h.active(), None);
    assert!(matches!(
        h.engine.outcome(),
        MatchOutcome::Aborted(msg) if msg.contains("physics diverged")
    ));
    assert!(!h.board.last().unwrap().concluded);

    // Frames and input after the abort are dropped
    h.engine.update(DT).unwrap();
    h.engine.on_spacebar().unwrap();
    assert!(matches!(
        h.engine.start().unwrap_err(),
        CurlingError::AlreadyStarted
    ));

    h.engine.stop();
    h.engine.start().unwrap();
    assert_eq!(h.active(), Some(PhaseTag::LoadingPiece));
}

#[test]
fn test_load_failure_aborts_match() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();
    assert!(h.rink.fail_load("asset missing"));
    assert!(h.engine.update(DT).is_err());
    assert!(matches!(h.engine.outcome(), MatchOutcome::Aborted(_)));
    assert_eq!(h.board.len(), 1);
}

#[test]
fn test_invalid_config_refuses_to_start() {
    for bad in [
        MatchSettings {
            difficulty: "impossible".to_string(),
            ..settings(8, 1)
        },
        settings(0, 1),
        settings(8, -2),
    ] {
        let mut h = Harness::new(bad, FixedScoring::default());
        let err = h.engine.start().unwrap_err();
        assert!(err.is_config_error(), "{err}");
        assert_eq!(h.active(), None);
        assert_eq!(h.engine.transitions(), 0);
        assert_eq!(h.rink.pending_loads(), 0);
        assert!(h.board.is_empty());
    }
}

#[test]
fn test_resize_goes_to_camera_only() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.on_resize(640, 480);
    h.engine.start().unwrap();
    let transitions = h.engine.transitions();
    h.engine.on_resize(1920, 1080);

    assert_eq!(h.engine.transitions(), transitions);
    let calls = h.camera.calls();
    assert_eq!(calls.first(), Some(&CameraCall::Resize(640, 480)));
    assert_eq!(calls.last(), Some(&CameraCall::Resize(1920, 1080)));
    assert!(h.camera.resets() >= 1);
}

#[test]
fn test_player_charge_sets_shot_speed() {
    let mut h = Harness::new(settings(8, 1), FixedScoring::default());
    h.engine.start().unwrap();

    // Play until the human side is up
    loop {
        assert!(h.rink.resolve_load());
        h.engine.update(DT).unwrap();
        if h.active() == Some(PhaseTag::PlayerTurn) {
            break;
        }
        assert!(h.rink.resolve_shot(None));
        h.engine.update(DT).unwrap();
    }

    h.engine.on_pointer_move(PointerEvent::new(1.0, 0.0)).unwrap();
    h.engine.on_pointer_down(PointerEvent::default()).unwrap();
    for _ in 0..60 {
        h.engine.update(DT).unwrap();
    }
    h.engine.on_pointer_up(PointerEvent::default()).unwrap();
    assert_eq!(h.active(), Some(PhaseTag::PlayerShooting));

    let shot = *h.rink.delivered().last().unwrap();
    assert!(shot.is_in_bounds());
    assert!(shot.direction > 0.0);
    // One second of charge at half power per second
    assert!((shot.speed - (1.0 + 0.5 * 3.5)).abs() < 0.05, "{shot}");
}
