//! Queue lane pane rendering
//!
//! One colored lane per queue class, showing the labels of the units
//! currently in that lane plus how many scheduled units the compiled trace
//! put there in total.

use crate::queue::{class_counts, ExecutionStep, QueueClass, QueueState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the five queue lanes.
pub fn render_queues_pane(
    frame: &mut Frame,
    area: Rect,
    queue_state: &QueueState,
    steps: &[ExecutionStep],
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let outer = Block::default()
        .title(" Task Queues ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let totals = class_counts(steps);

    let lanes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(inner);

    for (lane_area, class) in lanes.iter().zip(QueueClass::ALL) {
        render_lane(frame, *lane_area, class, queue_state, totals.get(&class).copied());
    }
}

fn render_lane(
    frame: &mut Frame,
    area: Rect,
    class: QueueClass,
    queue_state: &QueueState,
    total_units: Option<usize>,
) {
    let color = DEFAULT_THEME.queue_color(class);
    let entries = queue_state.lane(class);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", class.display_name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            match total_units {
                Some(n) => format!("({} in queue, {} total)", entries.len(), n),
                None => format!("({} in queue)", entries.len()),
            },
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ])];

    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        // Front of the queue renders first.
        for entry in entries {
            lines.push(Line::from(vec![
                Span::styled("  ▸ ", Style::default().fg(color)),
                Span::styled(entry.label.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ]));
        }
    }

    let visible = area.height.max(1) as usize;
    lines.truncate(visible);
    frame.render_widget(Paragraph::new(lines), area);
}
