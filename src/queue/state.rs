//! Mutable queue snapshot the engine replays steps into
//!
//! A [`QueueState`] holds the current contents of each priority lane plus the
//! accumulated console output.  It is mutated exclusively by [`QueueState::apply`],
//! one step at a time, in compiled order; display code only ever reads it.

use super::step::{ExecutionStep, QueueClass, StepPhase};

/// Snapshot of the five queue lanes and console output at one point in the trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueState {
    pub call_stack: Vec<ExecutionStep>,
    pub microtask: Vec<ExecutionStep>,
    pub macrotask: Vec<ExecutionStep>,
    pub animation_frame: Vec<ExecutionStep>,
    pub idle: Vec<ExecutionStep>,

    /// Append-only console output, in print order.
    pub output: Vec<String>,

    /// Index of the most recently applied step (`None` before any step).
    pub current_step_index: Option<usize>,
    /// Source line of the most recently applied step.
    pub highlighted_line: Option<usize>,
    /// Annotation of the most recently applied step.
    pub current_annotation: Option<String>,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the lane for one queue class.
    pub fn lane(&self, class: QueueClass) -> &[ExecutionStep] {
        match class {
            QueueClass::CallStack => &self.call_stack,
            QueueClass::Microtask => &self.microtask,
            QueueClass::Macrotask => &self.macrotask,
            QueueClass::AnimationFrame => &self.animation_frame,
            QueueClass::Idle => &self.idle,
        }
    }

    fn lane_mut(&mut self, class: QueueClass) -> &mut Vec<ExecutionStep> {
        match class {
            QueueClass::CallStack => &mut self.call_stack,
            QueueClass::Microtask => &mut self.microtask,
            QueueClass::Macrotask => &mut self.macrotask,
            QueueClass::AnimationFrame => &mut self.animation_frame,
            QueueClass::Idle => &mut self.idle,
        }
    }

    /// Apply one step to the snapshot.
    ///
    /// Queue removal matches on the step's unit identity, not its label, so
    /// two units that happen to share a label cannot evict each other.
    pub fn apply(&mut self, index: usize, step: &ExecutionStep) {
        self.current_step_index = Some(index);
        self.highlighted_line = Some(step.source_line);
        self.current_annotation = Some(step.annotation.clone());

        match step.phase {
            StepPhase::Enqueue => {
                self.lane_mut(step.queue_class).push(step.clone());
            }

            StepPhase::Dequeue => {
                // The unit leaves its queue and is now executing.
                self.lane_mut(step.queue_class).retain(|s| s.unit != step.unit);
                self.call_stack.push(step.clone());
            }

            StepPhase::Execute => {
                if step.queue_class == QueueClass::CallStack {
                    // Synchronous calls do not nest in this model: a fresh
                    // frame replaces the whole stack.
                    self.call_stack = vec![step.clone()];
                } else {
                    // The callback's frame returns.
                    self.call_stack.retain(|s| s.unit != step.unit);
                }
                if let Some(out) = &step.output {
                    self.output.push(out.clone());
                }
            }

            StepPhase::Output => {
                if let Some(out) = &step.output {
                    self.output.push(out.clone());
                }
            }
        }
    }
}
