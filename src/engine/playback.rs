//! Playback engine: replays compiled steps into the queue snapshot
//!
//! The engine owns the step sequence, the single live [`QueueState`], and the
//! playback state machine (`Idle -> Playing <-> Paused -> Finished`).  Manual
//! stepping and timed playback share the same advance primitive, so
//! interleaving the two can never skip or reorder steps.

use std::time::{Duration, Instant};

use super::clock::PlaybackClock;
use crate::compiler::compile;
use crate::queue::{ExecutionStep, QueueState};

/// Where the engine is in its playback lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Before any step has been applied.
    Idle,
    /// Steps apply automatically on each elapsed clock deadline.
    Playing,
    /// Automatic advancement halted; position retained.
    Paused,
    /// The final step has been applied (or there were no steps to play).
    Finished,
}

/// Slowest playback speed accepted by [`ExecutionEngine::set_speed`].
pub const MIN_SPEED: u8 = 1;
/// Fastest playback speed accepted by [`ExecutionEngine::set_speed`].
pub const MAX_SPEED: u8 = 5;

/// Milliseconds between automatic steps at a given speed, clamped to a
/// 200ms floor so the fastest setting is still watchable.
fn interval_for(speed: u8) -> Duration {
    Duration::from_millis(1200u64.saturating_sub(speed as u64 * 200).max(200))
}

/// Replays a compiled step sequence under manual or timed control.
pub struct ExecutionEngine {
    steps: Vec<ExecutionStep>,
    state: QueueState,
    playback: PlaybackState,
    speed: u8,
    /// Index of the last applied step; `None` before the first.
    cursor: Option<usize>,
    clock: PlaybackClock,
}

impl ExecutionEngine {
    /// Build an engine over an already-compiled step sequence.
    pub fn new(steps: Vec<ExecutionStep>) -> Self {
        ExecutionEngine {
            steps,
            state: QueueState::new(),
            playback: PlaybackState::Idle,
            speed: MIN_SPEED,
            cursor: None,
            clock: PlaybackClock::new(),
        }
    }

    /// Compile `source` and build an engine over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(compile(source))
    }

    /// Start automatic advancement.  No-op once finished; an empty step
    /// sequence finishes immediately.
    pub fn play(&mut self) {
        if self.playback == PlaybackState::Finished {
            return;
        }
        if self.steps.is_empty() {
            self.playback = PlaybackState::Finished;
            return;
        }
        self.playback = PlaybackState::Playing;
        self.clock.arm(Instant::now(), interval_for(self.speed));
    }

    /// Halt automatic advancement, keeping the current position.
    pub fn pause(&mut self) {
        self.clock.cancel();
        if self.playback == PlaybackState::Playing {
            self.playback = PlaybackState::Paused;
        }
    }

    /// Apply exactly one step, pausing first if playing.  No-op once finished.
    pub fn step(&mut self) {
        if self.playback == PlaybackState::Playing {
            self.pause();
        }
        self.advance();
    }

    /// Return to the initial position with an empty queue snapshot.
    pub fn reset(&mut self) {
        self.clock.cancel();
        self.cursor = None;
        self.state = QueueState::new();
        self.playback = PlaybackState::Idle;
    }

    /// Recompile from new source text and fully reset.
    pub fn load_source(&mut self, source: &str) {
        self.clock.cancel();
        self.steps = compile(source);
        self.cursor = None;
        self.state = QueueState::new();
        self.playback = PlaybackState::Idle;
    }

    /// Adjust the cadence for subsequent automatic steps.  The value is
    /// clamped to `MIN_SPEED..=MAX_SPEED`; an already-armed deadline keeps
    /// its original timing.
    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Drive timed playback.  Applies at most one step, and only when playing
    /// with an elapsed deadline.  Returns true if a step was applied.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.playback != PlaybackState::Playing {
            return false;
        }
        if !self.clock.fire(now) {
            return false;
        }
        let applied = self.advance();
        if self.playback == PlaybackState::Playing {
            self.clock.arm(now, interval_for(self.speed));
        }
        applied
    }

    /// Shared advance primitive for both manual and timed stepping.
    fn advance(&mut self) -> bool {
        if self.playback == PlaybackState::Finished {
            return false;
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.steps.len() {
            self.playback = PlaybackState::Finished;
            self.clock.cancel();
            return false;
        }
        self.state.apply(next, &self.steps[next]);
        self.cursor = Some(next);
        if next + 1 == self.steps.len() {
            self.playback = PlaybackState::Finished;
            self.clock.cancel();
        }
        true
    }

    // Read-only projections for display collaborators.

    pub fn queue_state(&self) -> &QueueState {
        &self.state
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Index of the last applied step, `None` before the first.
    pub fn current_step_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    /// The most recently applied step, if any.
    pub fn current_step(&self) -> Option<&ExecutionStep> {
        self.cursor.and_then(|c| self.steps.get(c))
    }
}
