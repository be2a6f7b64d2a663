//! Step emission: flattening scheduled units into the replayable trace
//!
//! Emission follows a fixed six-phase ordering that mirrors queue priority:
//! synchronous code runs first, then every registration enqueues, then the
//! queues drain in priority order (microtask, macrotask with its own nested
//! drain, animation frame, idle).  This is a deliberate simplification of
//! true interleaving; it teaches the relative priorities without modeling a
//! full scheduler.

use super::scanner::{scan_units, ScheduledUnit};
use crate::queue::{ExecutionStep, QueueClass, StepId, StepPhase};

/// Compile source text into an ordered sequence of execution steps.
///
/// Total function: unrecognized constructs are ignored and the worst case is
/// an empty trace.  Identical source always compiles to an identical step
/// sequence, field for field.
pub fn compile(source: &str) -> Vec<ExecutionStep> {
    let units = scan_units(source);
    Emitter::new().flatten(&units)
}

struct Emitter {
    next_id: StepId,
    steps: Vec<ExecutionStep>,
}

impl Emitter {
    fn new() -> Self {
        Emitter {
            next_id: 0,
            steps: Vec::new(),
        }
    }

    fn flatten(mut self, units: &[ScheduledUnit]) -> Vec<ExecutionStep> {
        let (sync, deferred): (Vec<&ScheduledUnit>, Vec<&ScheduledUnit>) = units
            .iter()
            .partition(|u| u.queue_class == QueueClass::CallStack && u.nested.is_empty());

        // Phase 1: synchronous code executes immediately, in source order.
        for &unit in &sync {
            self.push(
                unit,
                StepPhase::Execute,
                "Synchronous code executes immediately on the call stack",
                true,
            );
        }

        // Phase 2: every registration enqueues before any queue is drained.
        for &unit in &deferred {
            self.push(unit, StepPhase::Enqueue, enqueue_annotation(unit.queue_class), false);
        }

        // Phase 3: the microtask queue drains completely first.
        for unit in deferred.iter().copied().filter(|u| u.queue_class == QueueClass::Microtask) {
            self.push(
                unit,
                StepPhase::Dequeue,
                "Microtask queue drains first, ahead of any macrotask",
                false,
            );
            self.push(unit, StepPhase::Execute, "Executing microtask on the call stack", true);
        }

        // Phase 4: macrotasks run one at a time; anything a macrotask
        // schedules drains before the next macrotask gets a turn.
        for unit in deferred.iter().copied().filter(|u| u.queue_class == QueueClass::Macrotask) {
            self.push(
                unit,
                StepPhase::Dequeue,
                "Timer expired, dequeuing from the macrotask queue",
                false,
            );
            self.push(
                unit,
                StepPhase::Execute,
                "Executing macrotask callback on the call stack",
                true,
            );
            for child in &unit.nested {
                self.push(
                    child,
                    StepPhase::Enqueue,
                    "Scheduled from inside the macrotask callback",
                    false,
                );
                self.push(
                    child,
                    StepPhase::Dequeue,
                    "Draining work scheduled by the macrotask before the next one runs",
                    false,
                );
                self.push(child, StepPhase::Execute, "Executing nested callback", true);
            }
        }

        // Phase 5: animation frame callbacks run when a paint is due.
        let frames = deferred
            .iter()
            .copied()
            .filter(|u| u.queue_class == QueueClass::AnimationFrame);
        for unit in frames {
            self.push(
                unit,
                StepPhase::Dequeue,
                "Paint is due, dequeuing the animation frame callback",
                false,
            );
            self.push(unit, StepPhase::Execute, "Executing animation frame callback", true);
        }

        // Phase 6: idle callbacks run last, when nothing else is waiting.
        for unit in deferred.iter().copied().filter(|u| u.queue_class == QueueClass::Idle) {
            self.push(
                unit,
                StepPhase::Dequeue,
                "Nothing left to run, dequeuing the idle callback",
                false,
            );
            self.push(
                unit,
                StepPhase::Execute,
                "Executing idle callback, the lowest priority work",
                true,
            );
        }

        self.steps
    }

    fn push(
        &mut self,
        unit: &ScheduledUnit,
        phase: StepPhase,
        annotation: &str,
        with_output: bool,
    ) {
        let id = self.next_id;
        self.next_id += 1;
        self.steps.push(ExecutionStep {
            id,
            unit: unit.unit,
            code: unit.code.clone(),
            label: unit.label.clone(),
            annotation: annotation.to_string(),
            queue_class: unit.queue_class,
            source_line: unit.source_line,
            phase,
            output: if with_output { unit.output.clone() } else { None },
        });
    }
}

fn enqueue_annotation(class: QueueClass) -> &'static str {
    match class {
        QueueClass::Microtask => "Promise resolved, callback added to the microtask queue",
        QueueClass::Macrotask => "setTimeout registered, callback added to the macrotask queue",
        QueueClass::AnimationFrame => {
            "requestAnimationFrame registered, callback added to the animation frame queue"
        }
        QueueClass::Idle => "requestIdleCallback registered, callback added to the idle queue",
        QueueClass::CallStack => "Pushed onto the call stack",
    }
}
