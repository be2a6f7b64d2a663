//! Step and queue-class types shared by the compiler and the engine
//!
//! An [`ExecutionStep`] is one atomic, replayable transition in the compiled
//! trace.  Steps are immutable once the compiler emits them; the engine only
//! clones them into [`QueueState`](super::state::QueueState) lanes.

use rustc_hash::FxHashMap;

/// Unique identity of a single emitted step.  Assigned from a per-compile
/// monotonic counter, so recompiling identical source yields identical ids.
pub type StepId = u64;

/// Identity of the scheduled unit a step originated from.  All steps in one
/// unit's lifecycle (enqueue, dequeue, execute) share the same `UnitId`, which
/// is what queue removal matches on.
pub type UnitId = u32;

/// The five fixed priority lanes of the event loop model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueClass {
    CallStack,
    Microtask,
    Macrotask,
    AnimationFrame,
    Idle,
}

impl QueueClass {
    /// All classes in drain priority order (call stack first, idle last).
    pub const ALL: [QueueClass; 5] = [
        QueueClass::CallStack,
        QueueClass::Microtask,
        QueueClass::Macrotask,
        QueueClass::AnimationFrame,
        QueueClass::Idle,
    ];

    /// Human-readable lane title for display.
    pub fn display_name(self) -> &'static str {
        match self {
            QueueClass::CallStack => "Call Stack",
            QueueClass::Microtask => "Microtask Queue",
            QueueClass::Macrotask => "Macrotask Queue",
            QueueClass::AnimationFrame => "Animation Frames",
            QueueClass::Idle => "Idle Callbacks",
        }
    }

    /// Generic label used when a unit produced no output to derive one from.
    pub fn fallback_label(self) -> &'static str {
        match self {
            QueueClass::CallStack => "synchronous code",
            QueueClass::Microtask => "microtask callback",
            QueueClass::Macrotask => "setTimeout callback",
            QueueClass::AnimationFrame => "rAF callback",
            QueueClass::Idle => "idle callback",
        }
    }
}

/// Lifecycle phase of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// The unit's callback is registered into its queue.
    Enqueue,
    /// The unit is pulled off its queue onto the call stack.
    Dequeue,
    /// The unit's callback runs; may produce console output.
    Execute,
    /// Output-only transition, for steps with no execute of their own.
    Output,
}

/// One atomic, replayable transition in the compiled trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionStep {
    pub id: StepId,
    pub unit: UnitId,
    /// Reconstructed call text, for display in queue lanes.
    pub code: String,
    /// Short description derived from the unit's output (or a fallback).
    pub label: String,
    /// Human-readable explanation of what this step models.
    pub annotation: String,
    pub queue_class: QueueClass,
    /// 1-based line in the source text, for highlighting.
    pub source_line: usize,
    pub phase: StepPhase,
    /// Present only on steps that print to the console.
    pub output: Option<String>,
}

/// Count how many distinct scheduled units appear in each queue class.
///
/// Used by the summary display; a unit is counted once no matter how many
/// lifecycle steps it expands to.
pub fn class_counts(steps: &[ExecutionStep]) -> FxHashMap<QueueClass, usize> {
    let mut seen: FxHashMap<QueueClass, Vec<UnitId>> = FxHashMap::default();
    for step in steps {
        let units = seen.entry(step.queue_class).or_default();
        if !units.contains(&step.unit) {
            units.push(step.unit);
        }
    }
    seen.into_iter().map(|(class, units)| (class, units.len())).collect()
}
