//! # Introduction
//!
//! tasktty compiles a small JavaScript-like snippet into a deterministic trace
//! of event-loop steps, then replays that trace one step at a time through a
//! terminal UI built with [ratatui](https://docs.rs/ratatui).  Each step shows
//! where a callback sits in the five priority lanes (call stack, microtask,
//! macrotask, animation frame, idle) and what the console has printed so far.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Step Compiler → ExecutionStep sequence → Engine → QueueState → TUI
//! ```
//!
//! 1. [`compiler`] — scans the source for recognized scheduling constructs and
//!    emits the ordered [`queue::ExecutionStep`] sequence.
//! 2. [`queue`] — the step data model and the mutable [`queue::QueueState`]
//!    snapshot the engine replays into.
//! 3. [`engine`] — playback: transport controls, the cancelable clock, and the
//!    step application loop.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Recognized constructs
//!
//! Top-level `console.log`, `setTimeout` (including nested `Promise.resolve()`
//! continuations in its body), `Promise.resolve().then` chains,
//! `queueMicrotask`, `requestAnimationFrame`, `requestIdleCallback`.
//! This is a pedagogical model, not an interpreter: anything else is ignored,
//! and ordering follows a fixed priority drain rather than real interleaving.

pub mod compiler;
pub mod engine;
pub mod queue;
pub mod ui;
