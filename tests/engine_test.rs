// Integration tests for the playback engine

use std::time::{Duration, Instant};

use tasktty::compiler::{compile, DEFAULT_DEMO_SOURCE};
use tasktty::engine::{ExecutionEngine, PlaybackState};
use tasktty::queue::{QueueClass, QueueState, StepPhase, UnitId};

/// Drive timed playback to completion with simulated time.
fn play_to_end(engine: &mut ExecutionEngine) {
    engine.play();
    let mut now = Instant::now() + Duration::from_secs(2);
    let mut guard = 0;
    while engine.playback_state() == PlaybackState::Playing {
        engine.tick(now);
        now += Duration::from_secs(2);
        guard += 1;
        assert!(guard < 10_000, "playback did not terminate");
    }
}

/// Every unit identity must sit in at most one lane at any point in time.
fn assert_containment(state: &QueueState) {
    let mut seen: Vec<UnitId> = Vec::new();
    for class in QueueClass::ALL {
        for entry in state.lane(class) {
            assert!(
                !seen.contains(&entry.unit),
                "unit {} appears in more than one lane",
                entry.unit
            );
            seen.push(entry.unit);
        }
    }
}

#[test]
fn test_manual_stepping_reaches_same_state_as_playback() {
    let mut played = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    play_to_end(&mut played);
    assert_eq!(played.playback_state(), PlaybackState::Finished);

    let mut stepped = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    for _ in 0..stepped.total_steps() {
        stepped.step();
    }
    assert_eq!(stepped.playback_state(), PlaybackState::Finished);
    assert_eq!(stepped.queue_state(), played.queue_state());
}

#[test]
fn test_reset_then_replay_is_idempotent() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    play_to_end(&mut engine);
    let final_state = engine.queue_state().clone();

    engine.reset();
    assert_eq!(engine.playback_state(), PlaybackState::Idle);
    assert_eq!(engine.current_step_index(), None);
    assert_eq!(engine.queue_state(), &QueueState::new());

    let total = engine.total_steps();
    for _ in 0..total {
        engine.step();
    }
    assert_eq!(engine.queue_state(), &final_state);
}

#[test]
fn test_queue_containment_holds_at_every_prefix() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    let total = engine.total_steps();
    for _ in 0..total {
        engine.step();
        assert_containment(engine.queue_state());
    }
}

#[test]
fn test_play_on_empty_trace_finishes_immediately() {
    let mut engine = ExecutionEngine::from_source("");
    assert_eq!(engine.total_steps(), 0);
    engine.play();
    assert_eq!(engine.playback_state(), PlaybackState::Finished);
    assert_eq!(engine.queue_state(), &QueueState::new());
}

#[test]
fn test_stale_tick_after_reset_is_a_no_op() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.play();
    assert!(engine.tick(Instant::now() + Duration::from_secs(5)));

    // Reset must invalidate the pending deadline: a tick arriving afterwards
    // (however late) applies nothing.
    engine.reset();
    assert!(!engine.tick(Instant::now() + Duration::from_secs(60)));
    assert_eq!(engine.playback_state(), PlaybackState::Idle);
    assert_eq!(engine.current_step_index(), None);
    assert_eq!(engine.queue_state(), &QueueState::new());
}

#[test]
fn test_tick_before_deadline_applies_nothing() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.play();
    // Default speed cadence is 1000ms; an immediate tick is too early.
    assert!(!engine.tick(Instant::now()));
    assert_eq!(engine.current_step_index(), None);
}

#[test]
fn test_pause_retains_position() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.step();
    engine.step();
    engine.play();
    engine.pause();
    assert_eq!(engine.playback_state(), PlaybackState::Paused);
    assert_eq!(engine.current_step_index(), Some(1));

    // No deadline survives a pause.
    assert!(!engine.tick(Instant::now() + Duration::from_secs(60)));
    assert_eq!(engine.current_step_index(), Some(1));
}

#[test]
fn test_step_while_playing_pauses_first() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.play();
    engine.step();
    assert_eq!(engine.playback_state(), PlaybackState::Paused);
    assert_eq!(engine.current_step_index(), Some(0));
}

#[test]
fn test_step_and_play_are_no_ops_once_finished() {
    let mut engine = ExecutionEngine::from_source("console.log(\"only\");\n");
    engine.step();
    assert_eq!(engine.playback_state(), PlaybackState::Finished);
    let final_state = engine.queue_state().clone();

    engine.step();
    engine.play();
    assert!(!engine.tick(Instant::now() + Duration::from_secs(60)));
    assert_eq!(engine.playback_state(), PlaybackState::Finished);
    assert_eq!(engine.queue_state(), &final_state);
}

#[test]
fn test_speed_is_clamped() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.set_speed(0);
    assert_eq!(engine.speed(), 1);
    engine.set_speed(99);
    assert_eq!(engine.speed(), 5);
    engine.set_speed(3);
    assert_eq!(engine.speed(), 3);
}

#[test]
fn test_dequeue_moves_unit_onto_call_stack() {
    let source = "queueMicrotask(() => {\n  console.log(\"m - task\");\n});\n";
    let mut engine = ExecutionEngine::from_source(source);

    // Enqueue
    engine.step();
    assert_eq!(engine.queue_state().microtask.len(), 1);
    assert!(engine.queue_state().call_stack.is_empty());

    // Dequeue: leaves the microtask lane, now executing
    engine.step();
    assert!(engine.queue_state().microtask.is_empty());
    assert_eq!(engine.queue_state().call_stack.len(), 1);
    assert_eq!(engine.queue_state().call_stack[0].label, "task");

    // Execute: frame returns, output appended
    engine.step();
    assert!(engine.queue_state().call_stack.is_empty());
    assert_eq!(engine.queue_state().output, vec!["m - task".to_string()]);
}

#[test]
fn test_sync_execute_replaces_call_stack() {
    let source = "console.log(\"a\");\nconsole.log(\"b\");\n";
    let mut engine = ExecutionEngine::from_source(source);
    engine.step();
    assert_eq!(engine.queue_state().call_stack.len(), 1);
    engine.step();
    // A fresh synchronous frame replaces the stack rather than nesting.
    assert_eq!(engine.queue_state().call_stack.len(), 1);
    assert_eq!(engine.queue_state().call_stack[0].label, "b");
    assert_eq!(engine.queue_state().output, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_projections_track_last_applied_step() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    let steps = compile(DEFAULT_DEMO_SOURCE);
    engine.step();
    let state = engine.queue_state();
    assert_eq!(state.current_step_index, Some(0));
    assert_eq!(state.highlighted_line, Some(steps[0].source_line));
    assert_eq!(state.current_annotation.as_deref(), Some(steps[0].annotation.as_str()));
}

#[test]
fn test_load_source_swaps_trace_and_resets() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.play();
    engine.step();
    let old_total = engine.total_steps();

    engine.load_source("console.log(\"fresh\");\n");
    assert_eq!(engine.playback_state(), PlaybackState::Idle);
    assert_eq!(engine.current_step_index(), None);
    assert_eq!(engine.queue_state(), &QueueState::new());
    assert_ne!(engine.total_steps(), old_total);
    assert_eq!(engine.total_steps(), 1);

    // A deadline armed before the reload must not fire afterwards.
    assert!(!engine.tick(Instant::now() + Duration::from_secs(60)));
}

#[test]
fn test_set_speed_does_not_rearm_pending_deadline() {
    let mut engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    engine.play();
    engine.set_speed(5);
    // The deadline armed at speed 1 keeps its original timing: 300ms in is
    // past the speed-5 cadence (200ms) but before the armed 1000ms.
    assert!(!engine.tick(Instant::now() + Duration::from_millis(300)));
    assert!(engine.tick(Instant::now() + Duration::from_millis(1500)));
}

#[test]
fn test_nested_continuation_state_during_macrotask_drain() {
    let source = r#"setTimeout(() => {
  console.log("outer - macro");
  Promise.resolve().then(() => {
    console.log("inner - micro");
  });
}, 0);
"#;
    let mut engine = ExecutionEngine::from_source(source);
    let total = engine.total_steps();
    for _ in 0..total {
        engine.step();
        assert_containment(engine.queue_state());
    }
    assert_eq!(
        engine.queue_state().output,
        vec!["outer - macro".to_string(), "inner - micro".to_string()]
    );
}

#[test]
fn test_steps_are_exposed_read_only_and_stable() {
    let engine = ExecutionEngine::from_source(DEFAULT_DEMO_SOURCE);
    assert_eq!(engine.steps(), compile(DEFAULT_DEMO_SOURCE).as_slice());
    assert!(engine
        .steps()
        .iter()
        .all(|s| matches!(
            s.phase,
            StepPhase::Enqueue | StepPhase::Dequeue | StepPhase::Execute | StepPhase::Output
        )));
}
