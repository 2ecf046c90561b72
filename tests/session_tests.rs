//! Session and round-flow integration tests.
//!
//! These drive a `Session` through events the way a presentation layer
//! would, including delayed transitions and the countdown.

use word_architect::core::{GameConfig, GameError, GenerationMode, SpellingGate};
use word_architect::morphemes::{GameData, MorphemeDatabase, MorphemeEntry};
use word_architect::questions::{CuratedQuestion, Verdict};
use word_architect::round::{RoundPhase, ScheduledTransition, Scheduler, TransitionKind};
use word_architect::session::{
    GameEvent, GameNotice, HighScoreStore, JsonFileHighScore, MemoryHighScore, Session,
    SessionStatus,
};

fn entry(m: &str, meaning: &str) -> MorphemeEntry {
    MorphemeEntry::new(m, meaning)
}

fn data() -> GameData {
    GameData::new(
        MorphemeDatabase::new(
            vec![entry("re", "again"), entry("pre", "before"), entry("con", "together")],
            vec![
                entry("act", "do").with_examples(["reaction"]),
                entry("dict", "say"),
                entry("struct", "build"),
            ],
            vec![entry("ion", "act of"), entry("able", "can be"), entry("er", "one who")],
        ),
        vec![CuratedQuestion::new(
            "to build together",
            ["con", "struct"],
            "construct",
        )],
    )
}

fn timed(seconds: u32) -> Session {
    let config = GameConfig::timed_challenge()
        .with_seed(7)
        .with_timer(Some(seconds));
    Session::new(config, data(), MemoryHighScore::new()).unwrap()
}

fn construction() -> Session {
    Session::new(GameConfig::construction().with_seed(7), data(), MemoryHighScore::new()).unwrap()
}

fn started(mut session: Session) -> Session {
    session.handle(GameEvent::Start).unwrap();
    session
}

fn answer(session: &Session) -> String {
    session.round().unwrap().question().answer.clone()
}

fn schedules(notices: &[GameNotice]) -> Vec<(u64, TransitionKind, u64)> {
    notices
        .iter()
        .filter_map(|n| match n {
            GameNotice::Schedule(t) => Some((t.generation, t.kind, t.delay_ms)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Test that input before `Start` is ignored.
#[test]
fn test_events_before_start_are_ignored() {
    let mut session = timed(180);
    assert_eq!(session.status(), SessionStatus::Ready);

    assert!(session.handle(GameEvent::SubmitAnswer("construct".into())).unwrap().is_empty());
    assert!(session.handle(GameEvent::Tick).unwrap().is_empty());
    assert!(session.round().is_none());
}

/// Test that starting shows the first question and the full countdown.
#[test]
fn test_start_presents_question_and_countdown() {
    let mut session = timed(180);
    let notices = session.handle(GameEvent::Start).unwrap();

    assert!(matches!(
        &notices[0],
        GameNotice::NewQuestion { generation: 1, definition } if definition == "to build together"
    ));
    assert_eq!(notices[1], GameNotice::Countdown { remaining: 180 });
    assert_eq!(session.status(), SessionStatus::Playing);
}

/// Test that derived mode without any root examples fails to start.
#[test]
fn test_no_eligible_root_fails_start() {
    let data = GameData::new(
        MorphemeDatabase::new(vec![], vec![entry("act", "do")], vec![]),
        vec![],
    );
    let mut session =
        Session::new(GameConfig::construction(), data, MemoryHighScore::new()).unwrap();

    let err = session.handle(GameEvent::Start).unwrap_err();
    assert!(matches!(err, GameError::NoEligibleRoot));
    assert_eq!(session.status(), SessionStatus::Ready);
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig::timed_challenge().with_bank_size(0);
    let err = Session::new(config, data(), MemoryHighScore::new()).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

// =============================================================================
// Answer Checking
// =============================================================================

/// Test that a correct answer scores once and schedules a single advance.
#[test]
fn test_correct_answer_scores_and_schedules_one_advance() {
    let mut session = started(timed(180));
    let notices = session
        .handle(GameEvent::SubmitAnswer(" Construct ".into()))
        .unwrap();

    assert_eq!(
        notices[0],
        GameNotice::Answered {
            verdict: Verdict::Correct,
            points: 10,
            score: 10
        }
    );
    assert_eq!(schedules(&notices), vec![(1, TransitionKind::Advance, 800)]);

    // Input is disabled once the round is resolved.
    let again = session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap();
    assert!(again.is_empty());
    assert_eq!(session.score(), 10);
}

/// Test that a wrong answer keeps the same question open.
#[test]
fn test_incorrect_answer_keeps_question() {
    let mut session = started(timed(180));
    let notices = session
        .handle(GameEvent::SubmitAnswer("destruct".into()))
        .unwrap();

    assert_eq!(
        notices,
        vec![GameNotice::Answered {
            verdict: Verdict::Incorrect,
            points: 0,
            score: 0
        }]
    );
    let round = session.round().unwrap();
    assert_eq!(round.phase(), RoundPhase::Building);
    assert_eq!(round.generation(), 1);
    assert_eq!(round.attempts(), 1);
}

#[test]
fn test_blank_submission_changes_nothing() {
    let mut session = started(timed(180));

    for blank in ["", "   "] {
        let notices = session.handle(GameEvent::SubmitAnswer(blank.into())).unwrap();
        assert!(notices.is_empty());
    }
    let round = session.round().unwrap();
    assert_eq!(round.attempts(), 0);
    assert_eq!(round.phase(), RoundPhase::Building);
}

// =============================================================================
// Hints and Reveal
// =============================================================================

/// Test that asking for the hint twice gives the same text.
#[test]
fn test_hint_is_idempotent() {
    let mut session = started(timed(180));

    let first = session.handle(GameEvent::RequestHint).unwrap();
    let second = session.handle(GameEvent::RequestHint).unwrap();

    let text = |n: &[GameNotice]| match &n[0] {
        GameNotice::Hint { text, repeated } => (text.clone(), *repeated),
        other => panic!("expected hint, got {other:?}"),
    };
    assert_eq!(
        text(&first),
        ("con (together), struct (build)".to_string(), false)
    );
    assert_eq!(text(&second), (text(&first).0, true));
    assert!(session.round().unwrap().hint_revealed());
}

/// Test that the challenge only reveals after a hint, then locks the round.
#[test]
fn test_reveal_requires_hint_in_challenge() {
    let mut session = started(timed(180));
    assert!(session.handle(GameEvent::RevealAnswer).unwrap().is_empty());
    assert!(!session.snapshot().round.unwrap().can_reveal);

    session.handle(GameEvent::RequestHint).unwrap();
    assert!(session.snapshot().round.unwrap().can_reveal);

    let notices = session.handle(GameEvent::RevealAnswer).unwrap();
    assert_eq!(
        notices[0],
        GameNotice::Revealed {
            answer: "construct".into(),
            breakdown: "con (together) + struct (build)".into(),
        }
    );
    assert_eq!(schedules(&notices), vec![(1, TransitionKind::AfterReveal, 3000)]);

    let snapshot = session.snapshot().round.unwrap();
    assert_eq!(snapshot.phase, RoundPhase::Revealed);
    assert_eq!(snapshot.answer.as_deref(), Some("construct"));
    assert!(!snapshot.spelling_open);

    assert!(session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap()
        .is_empty());
}

#[test]
fn test_construction_reveal_without_hint() {
    let mut session = started(construction());
    let notices = session.handle(GameEvent::RevealAnswer).unwrap();
    assert!(matches!(&notices[0], GameNotice::Revealed { answer, .. } if answer == "reaction"));
}

// =============================================================================
// Construction Zone
// =============================================================================

/// Test that the all-parts gate opens on the last part and closes on removal.
#[test]
fn test_assembly_gates_spelling() {
    let mut session = started(construction());
    assert!(!session.snapshot().round.unwrap().spelling_open);

    assert!(session
        .handle(GameEvent::SubmitAnswer("reaction".into()))
        .unwrap()
        .is_empty());

    let notices = session.handle(GameEvent::AssemblePart("re".into())).unwrap();
    assert!(matches!(
        &notices[0],
        GameNotice::Assembly { spelling_open: false, gate_changed: false, .. }
    ));
    session.handle(GameEvent::AssemblePart("act".into())).unwrap();
    let notices = session.handle(GameEvent::AssemblePart("ion".into())).unwrap();
    assert_eq!(
        notices,
        vec![GameNotice::Assembly {
            assembled: vec!["re".into(), "act".into(), "ion".into()],
            spelling_open: true,
            gate_changed: true,
        }]
    );

    let notices = session.handle(GameEvent::RemovePart("act".into())).unwrap();
    assert!(matches!(
        &notices[0],
        GameNotice::Assembly { spelling_open: false, gate_changed: true, .. }
    ));

    assert!(session.handle(GameEvent::RemovePart("act".into())).unwrap().is_empty());
    assert!(session.handle(GameEvent::AssemblePart("zzz".into())).unwrap().is_empty());
}

/// Test that the one-part gate opens on the first tile only.
#[test]
fn test_at_least_one_part_gate() {
    let config = GameConfig::construction()
        .with_seed(7)
        .with_spelling_gate(SpellingGate::AtLeastOnePart);
    let mut session = started(Session::new(config, data(), MemoryHighScore::new()).unwrap());

    let notices = session.handle(GameEvent::AssemblePart("act".into())).unwrap();
    assert!(matches!(
        &notices[0],
        GameNotice::Assembly { spelling_open: true, gate_changed: true, .. }
    ));
    let notices = session.handle(GameEvent::AssemblePart("re".into())).unwrap();
    assert!(matches!(
        &notices[0],
        GameNotice::Assembly { spelling_open: true, gate_changed: false, .. }
    ));

    let notices = session.handle(GameEvent::SubmitAnswer("reaction".into())).unwrap();
    assert!(matches!(
        &notices[0],
        GameNotice::Answered { verdict: Verdict::Correct, .. }
    ));
}

/// Test that the next round after a correct answer starts empty.
#[test]
fn test_round_reset_clears_assembly() {
    let mut session = started(construction());
    let mut scheduler = Scheduler::new();

    for part in ["re", "act", "ion"] {
        session
            .dispatch(GameEvent::AssemblePart(part.into()), &mut scheduler)
            .unwrap();
    }
    session
        .dispatch(GameEvent::SubmitAnswer("reaction".into()), &mut scheduler)
        .unwrap();

    let notices = session.advance_time(&mut scheduler, 2000).unwrap();
    assert!(matches!(notices[0], GameNotice::NewQuestion { generation: 2, .. }));

    let round = session.snapshot().round.unwrap();
    assert!(round.assembled.is_empty());
    assert!(!round.spelling_open);
    assert_eq!(round.hint, None);
    assert_eq!(round.phase, RoundPhase::Building);
}

/// Test that the next round after a reveal starts empty, after the reveal delay.
#[test]
fn test_reveal_resets_round_after_delay() {
    let mut session = started(construction());
    let mut scheduler = Scheduler::new();

    for part in ["re", "act"] {
        session
            .dispatch(GameEvent::AssemblePart(part.into()), &mut scheduler)
            .unwrap();
    }
    let notices = session
        .dispatch(GameEvent::RevealAnswer, &mut scheduler)
        .unwrap();
    assert_eq!(schedules(&notices), vec![(1, TransitionKind::AfterReveal, 3000)]);

    assert!(session.advance_time(&mut scheduler, 2999).unwrap().is_empty());
    assert_eq!(session.round().unwrap().phase(), RoundPhase::Revealed);

    let notices = session.advance_time(&mut scheduler, 1).unwrap();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], GameNotice::NewQuestion { generation: 2, .. }));

    let round = session.snapshot().round.unwrap();
    assert_eq!(round.generation, 2);
    assert!(round.assembled.is_empty());
    assert!(!round.spelling_open);
    assert_eq!(round.phase, RoundPhase::Building);
    assert_eq!(round.answer, None);
}

// =============================================================================
// Delayed Transitions
// =============================================================================

/// Test that the advance lands exactly when its delay has passed.
#[test]
fn test_advance_fires_after_delay() {
    let mut session = started(timed(180));
    let mut scheduler = Scheduler::new();

    let answer = answer(&session);
    session
        .dispatch(GameEvent::SubmitAnswer(answer), &mut scheduler)
        .unwrap();

    let early = session.advance_time(&mut scheduler, 799).unwrap();
    assert!(early.iter().all(|n| !matches!(n, GameNotice::NewQuestion { .. })));

    let notices = session.advance_time(&mut scheduler, 1).unwrap();
    assert!(matches!(notices[0], GameNotice::NewQuestion { generation: 2, .. }));
    assert_eq!(session.round().unwrap().phase(), RoundPhase::Building);
}

/// Test that an advance scheduled before a skip no longer replaces the round.
#[test]
fn test_stale_transition_is_ignored() {
    let mut session = started(timed(180));

    let notices = session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap();
    let stale = notices
        .iter()
        .find_map(|n| match n {
            GameNotice::Schedule(t) => Some(*t),
            _ => None,
        })
        .unwrap();

    session.handle(GameEvent::Skip).unwrap();
    assert_eq!(session.round().unwrap().generation(), 2);

    let notices = session.handle(GameEvent::TransitionElapsed(stale)).unwrap();
    assert!(notices.is_empty());
    assert_eq!(session.round().unwrap().generation(), 2);
}

/// Test that skipping during the reveal delay drops the pending reveal transition.
#[test]
fn test_skip_after_reveal_drops_pending_transition() {
    let mut session = started(construction());
    let mut scheduler = Scheduler::new();

    session
        .dispatch(GameEvent::RevealAnswer, &mut scheduler)
        .unwrap();
    let notices = session.dispatch(GameEvent::Skip, &mut scheduler).unwrap();
    assert!(matches!(notices[0], GameNotice::NewQuestion { generation: 2, .. }));
    assert_eq!(scheduler.pending(), 1);

    let notices = session.advance_time(&mut scheduler, 3000).unwrap();
    assert!(notices.is_empty());
    assert_eq!(scheduler.pending(), 0);

    let round = session.round().unwrap();
    assert_eq!(round.generation(), 2);
    assert_eq!(round.phase(), RoundPhase::Building);
}

#[test]
fn test_transition_for_unresolved_round_is_ignored() {
    let mut session = started(timed(180));
    let bogus = ScheduledTransition {
        generation: 1,
        kind: TransitionKind::Advance,
        delay_ms: 0,
    };
    assert!(session.handle(GameEvent::TransitionElapsed(bogus)).unwrap().is_empty());
    assert_eq!(session.round().unwrap().generation(), 1);
}

// =============================================================================
// Countdown
// =============================================================================

/// Test that a 180 s countdown ends the session once and ignores later ticks.
#[test]
fn test_countdown_ends_session_exactly_once() {
    let mut session = started(timed(180));
    let mut over = 0;

    for _ in 0..180 {
        for notice in session.handle(GameEvent::Tick).unwrap() {
            if let GameNotice::SessionOver { .. } = notice {
                over += 1;
            }
        }
    }
    assert_eq!(over, 1);
    assert_eq!(session.status(), SessionStatus::Over);
    assert_eq!(session.remaining_seconds(), Some(0));

    for _ in 0..5 {
        assert!(session.handle(GameEvent::Tick).unwrap().is_empty());
    }
}

#[test]
fn test_countdown_runs_regardless_of_round_state() {
    let mut session = started(timed(3));
    session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap();

    assert_eq!(
        session.handle(GameEvent::Tick).unwrap(),
        vec![GameNotice::Countdown { remaining: 2 }]
    );
}

/// Test that scheduler ticks end the session and stop ticking.
#[test]
fn test_scheduler_ticks_end_session() {
    let mut session = timed(180);
    let mut scheduler = Scheduler::new();
    session.dispatch(GameEvent::Start, &mut scheduler).unwrap();
    assert!(scheduler.is_ticking());

    let notices = session.advance_time(&mut scheduler, 200_000).unwrap();
    let over = notices
        .iter()
        .filter(|n| matches!(n, GameNotice::SessionOver { .. }))
        .count();
    assert_eq!(over, 1);
    assert!(!scheduler.is_ticking());
}

#[test]
fn test_untimed_session_ignores_ticks() {
    let mut session = started(construction());
    assert_eq!(session.remaining_seconds(), None);
    assert!(session.handle(GameEvent::Tick).unwrap().is_empty());
}

// =============================================================================
// High Score
// =============================================================================

/// Test that a beaten high score is written to the file and a lower one is not.
#[test]
fn test_new_high_score_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let config = GameConfig::timed_challenge().with_seed(1).with_timer(Some(2));

    let mut session = Session::new(config.clone(), data(), JsonFileHighScore::new(&path)).unwrap();
    session.handle(GameEvent::Start).unwrap();
    session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap();
    session.handle(GameEvent::Tick).unwrap();
    let notices = session.handle(GameEvent::Tick).unwrap();

    assert!(notices.contains(&GameNotice::SessionOver {
        final_score: 10,
        high_score: 10,
        new_high_score: true,
    }));
    assert_eq!(JsonFileHighScore::new(&path).load().unwrap(), 10);

    // A lower score leaves the stored value alone.
    let mut session = Session::new(config, data(), JsonFileHighScore::new(&path)).unwrap();
    assert_eq!(session.high_score(), 10);
    session.handle(GameEvent::Start).unwrap();
    session.handle(GameEvent::Tick).unwrap();
    let notices = session.handle(GameEvent::Tick).unwrap();
    assert!(notices.contains(&GameNotice::SessionOver {
        final_score: 0,
        high_score: 10,
        new_high_score: false,
    }));
}

/// Test that tying the high score does not count as beating it.
#[test]
fn test_equal_score_is_not_a_new_high_score() {
    let config = GameConfig::timed_challenge().with_seed(1).with_timer(Some(1));
    let mut session = Session::new(config, data(), MemoryHighScore::with_value(10)).unwrap();
    session.handle(GameEvent::Start).unwrap();
    session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap();

    let notices = session.handle(GameEvent::Tick).unwrap();
    assert!(notices.contains(&GameNotice::SessionOver {
        final_score: 10,
        high_score: 10,
        new_high_score: false,
    }));
}

/// Test that restarting after the session ends resets score and timer.
#[test]
fn test_restart_resets_score_and_timer() {
    let mut session = started(timed(2));
    session
        .handle(GameEvent::SubmitAnswer("construct".into()))
        .unwrap();
    session.handle(GameEvent::Tick).unwrap();
    session.handle(GameEvent::Tick).unwrap();
    assert_eq!(session.status(), SessionStatus::Over);

    session.handle(GameEvent::Start).unwrap();
    assert_eq!(session.status(), SessionStatus::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.remaining_seconds(), Some(2));
    assert_eq!(session.high_score(), 10);
}

#[test]
fn test_snapshot_serializes() {
    let session = started(construction());
    let json = serde_json::to_value(session.snapshot()).unwrap();

    assert_eq!(json["status"], "Playing");
    assert_eq!(json["round"]["bank"].as_array().unwrap().len(), 8);
    assert_eq!(json["round"]["required_parts"], 3);
    assert!(json["round"]["answer"].is_null());
}

/// Test that curated mode with no authored questions fails to start.
#[test]
fn test_curated_mode_without_questions() {
    let data = GameData::new(data().morphemes, vec![]);
    let config = GameConfig::timed_challenge().with_mode(GenerationMode::Curated);
    let mut session = Session::new(config, data, MemoryHighScore::new()).unwrap();
    assert!(matches!(
        session.handle(GameEvent::Start).unwrap_err(),
        GameError::NoCuratedQuestions
    ));
}
