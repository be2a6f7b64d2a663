//! Step compiler: source text to replayable execution steps
//!
//! The compiler is a best-effort pattern matcher, not a parser.  It scans each
//! line for the recognized scheduling constructs ([`scanner`]), then flattens
//! the discovered units into the fixed-priority step trace ([`emit`]).  It
//! never fails: malformed or unrecognized input simply contributes nothing to
//! the trace.

pub mod demo;
mod emit;
mod scanner;

pub use demo::DEFAULT_DEMO_SOURCE;
pub use emit::compile;
