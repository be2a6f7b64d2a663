//! Execution engine: playback state, transport controls, and the timed clock.

pub mod clock;
pub mod playback;

pub use clock::PlaybackClock;
pub use playback::{ExecutionEngine, PlaybackState, MAX_SPEED, MIN_SPEED};
