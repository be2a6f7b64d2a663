//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, timed playback
//! - **[`panes`]** — stateless render functions for each visible pane (source, queues,
//!   console output, annotation, status bar)
//! - **[`theme`]** — centralized color palette, including one color per queue class
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`ExecutionEngine`] and call [`App::run`] to start the event loop.
//!
//! [`ExecutionEngine`]: crate::engine::ExecutionEngine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
