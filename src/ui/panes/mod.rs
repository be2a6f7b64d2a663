//! Stateless render functions for each visible pane.

mod output;
mod queues;
mod source;
mod status;

pub use output::render_output_pane;
pub use queues::render_queues_pane;
pub use source::render_source_pane;
pub use status::{render_annotation_pane, render_status_bar};
