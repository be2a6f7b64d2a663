// Integration tests for the step compiler

use tasktty::compiler::{compile, DEFAULT_DEMO_SOURCE};
use tasktty::queue::{class_counts, ExecutionStep, QueueClass, StepPhase};

/// Source matching the canonical teaching scenario: one sync log, a macrotask,
/// an immediate continuation, a queued microtask, an animation frame, an idle
/// callback, and a closing sync log.
const SCENARIO: &str = r#"console.log("1 - first");

setTimeout(() => {
  console.log("2 - macro");
}, 0);

Promise.resolve().then(() => {
  console.log("3 - continuation");
});

queueMicrotask(() => {
  console.log("4 - micro");
});

requestAnimationFrame(() => {
  console.log("5 - frame");
});

requestIdleCallback(() => {
  console.log("6 - idle");
});

console.log("7 - last");
"#;

fn outputs_in_order(steps: &[ExecutionStep]) -> Vec<&str> {
    steps
        .iter()
        .filter_map(|s| s.output.as_deref())
        .collect()
}

#[test]
fn test_compile_is_deterministic() {
    let first = compile(DEFAULT_DEMO_SOURCE);
    let second = compile(DEFAULT_DEMO_SOURCE);
    assert!(!first.is_empty());
    assert_eq!(first, second, "identical source must compile identically");
}

#[test]
fn test_empty_source_compiles_to_empty_trace() {
    assert!(compile("").is_empty());
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let source = r#"const x = 5;
let y = compute(x);
if (x > 3) { y += 1; }
"#;
    assert!(compile(source).is_empty());
}

#[test]
fn test_step_ids_are_unique() {
    let steps = compile(DEFAULT_DEMO_SOURCE);
    for (i, a) in steps.iter().enumerate() {
        for b in &steps[i + 1..] {
            assert_ne!(a.id, b.id, "step ids must never be reused");
        }
    }
}

#[test]
fn test_lifecycle_steps_share_unit_identity() {
    let steps = compile(SCENARIO);
    let enqueue = steps
        .iter()
        .find(|s| s.phase == StepPhase::Enqueue && s.queue_class == QueueClass::Macrotask)
        .expect("macrotask enqueue");
    let dequeue = steps
        .iter()
        .find(|s| s.phase == StepPhase::Dequeue && s.queue_class == QueueClass::Macrotask)
        .expect("macrotask dequeue");
    let execute = steps
        .iter()
        .find(|s| s.phase == StepPhase::Execute && s.queue_class == QueueClass::Macrotask)
        .expect("macrotask execute");
    assert_eq!(enqueue.unit, dequeue.unit);
    assert_eq!(dequeue.unit, execute.unit);
    assert_ne!(enqueue.id, dequeue.id);
}

#[test]
fn test_scenario_output_order_follows_queue_priority() {
    let steps = compile(SCENARIO);
    assert_eq!(
        outputs_in_order(&steps),
        vec![
            "1 - first",
            "7 - last",
            "3 - continuation",
            "4 - micro",
            "2 - macro",
            "5 - frame",
            "6 - idle",
        ]
    );
}

#[test]
fn test_priority_invariant_over_phases() {
    let steps = compile(SCENARIO);

    let pos = |pred: &dyn Fn(&ExecutionStep) -> bool| -> Vec<usize> {
        steps
            .iter()
            .enumerate()
            .filter(|&(_, s)| pred(s))
            .map(|(i, _)| i)
            .collect()
    };

    let sync_exec = pos(&|s| {
        s.queue_class == QueueClass::CallStack && s.phase == StepPhase::Execute
    });
    let micro_deq = pos(&|s| {
        s.queue_class == QueueClass::Microtask && s.phase == StepPhase::Dequeue
    });
    let macro_deq = pos(&|s| {
        s.queue_class == QueueClass::Macrotask && s.phase == StepPhase::Dequeue
    });
    let anim_deq = pos(&|s| {
        s.queue_class == QueueClass::AnimationFrame && s.phase == StepPhase::Dequeue
    });
    let idle_deq = pos(&|s| s.queue_class == QueueClass::Idle && s.phase == StepPhase::Dequeue);

    let max = |v: &[usize]| v.iter().copied().max().unwrap();
    let min = |v: &[usize]| v.iter().copied().min().unwrap();

    assert!(max(&sync_exec) < min(&micro_deq));
    assert!(max(&micro_deq) < min(&macro_deq));
    assert!(max(&macro_deq) < min(&anim_deq));
    assert!(max(&anim_deq) < min(&idle_deq));
}

#[test]
fn test_nested_continuation_runs_between_macrotasks() {
    let source = r#"setTimeout(() => {
  console.log("first macro");
  Promise.resolve().then(() => {
    console.log("nested micro");
  });
}, 0);

setTimeout(() => {
  console.log("second macro");
}, 0);
"#;
    let steps = compile(source);

    let first_exec = steps
        .iter()
        .position(|s| s.phase == StepPhase::Execute && s.output.as_deref() == Some("first macro"))
        .expect("first macrotask execute");
    let second_deq = steps
        .iter()
        .position(|s| {
            s.phase == StepPhase::Dequeue && s.label == "second macro"
        })
        .expect("second macrotask dequeue");

    // The nested continuation's whole lifecycle sits between the owning
    // macrotask's execute and the next macrotask's dequeue.
    let nested: Vec<usize> = steps
        .iter()
        .enumerate()
        .filter(|(_, s)| s.label == "nested micro")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(nested.len(), 3, "nested unit expands to enqueue/dequeue/execute");
    for idx in &nested {
        assert!(*idx > first_exec);
        assert!(*idx < second_deq);
    }
    assert_eq!(steps[nested[0]].phase, StepPhase::Enqueue);
    assert_eq!(steps[nested[1]].phase, StepPhase::Dequeue);
    assert_eq!(steps[nested[2]].phase, StepPhase::Execute);

    // Output ordering follows: first macro, nested micro, second macro.
    assert_eq!(
        outputs_in_order(&steps),
        vec!["first macro", "nested micro", "second macro"]
    );
}

#[test]
fn test_chained_continuations_become_successive_microtasks() {
    let source = r#"Promise.resolve().then(() => {
  console.log("a - chain one");
}).then(() => {
  console.log("b - chain two");
});
"#;
    let steps = compile(source);
    let executes: Vec<&ExecutionStep> = steps
        .iter()
        .filter(|s| s.phase == StepPhase::Execute)
        .collect();
    assert_eq!(executes.len(), 2);
    assert_eq!(executes[0].label, "chain one");
    assert_eq!(executes[1].label, "chain two");
    assert!(executes.iter().all(|s| s.queue_class == QueueClass::Microtask));
}

#[test]
fn test_label_is_trailing_segment_after_separator() {
    let steps = compile("console.log(\"3: Microtask - Promise.then\");\n");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].label, "Promise.then");
    assert_eq!(steps[0].output.as_deref(), Some("3: Microtask - Promise.then"));
}

#[test]
fn test_label_without_separator_is_whole_output() {
    let steps = compile("console.log(\"plain text\");\n");
    assert_eq!(steps[0].label, "plain text");
}

#[test]
fn test_fallback_label_when_no_output_in_body() {
    let steps = compile("setTimeout(doWork, 0);\n");
    assert_eq!(steps.len(), 3, "enqueue, dequeue, execute");
    assert_eq!(steps[0].label, "setTimeout callback");
    assert!(steps.iter().all(|s| s.output.is_none()));
}

#[test]
fn test_indented_log_is_not_a_sync_unit() {
    let source = "  console.log(\"indented\");\n";
    assert!(compile(source).is_empty());
}

#[test]
fn test_unterminated_block_is_bounded() {
    // Closing delimiters never appear; scanning must clamp to end of source.
    let source = "setTimeout(() => {\n  console.log(\"x - trailing\");\n";
    let steps = compile(source);
    assert!(!steps.is_empty());
    let execute = steps
        .iter()
        .find(|s| s.phase == StepPhase::Execute)
        .expect("execute step");
    assert_eq!(execute.output.as_deref(), Some("x - trailing"));
    assert_eq!(execute.label, "trailing");
}

#[test]
fn test_source_lines_are_one_based() {
    let source = "console.log(\"top\");\n\nconsole.log(\"third\");\n";
    let steps = compile(source);
    assert_eq!(steps[0].source_line, 1);
    assert_eq!(steps[1].source_line, 3);
}

#[test]
fn test_log_without_string_literal_gets_generic_output() {
    let steps = compile("console.log(counter);\n");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].output.as_deref(), Some("output"));
}

#[test]
fn test_class_counts_count_units_not_steps() {
    let counts = class_counts(&compile(SCENARIO));
    assert_eq!(counts.get(&QueueClass::CallStack), Some(&2));
    assert_eq!(counts.get(&QueueClass::Macrotask), Some(&1));
    assert_eq!(counts.get(&QueueClass::Microtask), Some(&2));
    assert_eq!(counts.get(&QueueClass::AnimationFrame), Some(&1));
    assert_eq!(counts.get(&QueueClass::Idle), Some(&1));
}

#[test]
fn test_demo_source_prints_in_documented_order() {
    let steps = compile(DEFAULT_DEMO_SOURCE);
    let outputs = outputs_in_order(&steps);
    assert_eq!(
        outputs,
        vec![
            "1: Synchronous - Start",
            "11: Synchronous - End",
            "3: Microtask - Promise.then",
            "4: Microtask - queueMicrotask",
            "7: Microtask - Chained Promise 1",
            "8: Microtask - Chained Promise 2",
            "2: Macrotask - setTimeout",
            "9: Macrotask - setTimeout 2",
            "10: Microtask inside Macrotask",
            "5: Animation - rAF callback",
            "6: Idle - requestIdleCallback",
        ]
    );
}
