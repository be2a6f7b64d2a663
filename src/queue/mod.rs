//! Queue model: step types, queue classes, and the mutable queue snapshot.

pub mod state;
pub mod step;

pub use state::QueueState;
pub use step::{class_counts, ExecutionStep, QueueClass, StepId, StepPhase, UnitId};
