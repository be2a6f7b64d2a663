//! Main TUI application state and logic

use crate::engine::{ExecutionEngine, PlaybackState, MAX_SPEED, MIN_SPEED};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Queues,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> queues)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Queues,
            FocusedPane::Queues => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The playback engine
    pub engine: ExecutionEngine,

    /// The source snippet being visualized
    pub source: String,

    /// File the source was loaded from, if any (for reloading)
    pub source_path: Option<PathBuf>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app with the given engine and source snippet
    pub fn new(engine: ExecutionEngine, source: String, source_path: Option<PathBuf>) -> Self {
        App {
            engine,
            source,
            source_path,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive timed playback; the engine only applies a step when its
            // own deadline has elapsed.
            if self.engine.tick(Instant::now()) {
                self.output_scroll = usize::MAX;
                self.status_message = if self.engine.playback_state() == PlaybackState::Finished {
                    "Playback complete".to_string()
                } else {
                    "Playing...".to_string()
                };
            }

            // Use poll with timeout so playback keeps advancing between keys
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Layout: panes on top, one-line status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Console Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Queues (top) | Annotation (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(columns[1]);

        let queue_state = self.engine.queue_state();

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source,
            queue_state.highlighted_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[1],
            &queue_state.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_queues_pane(
            frame,
            right_rows[0],
            queue_state,
            self.engine.steps(),
            self.focused_pane == FocusedPane::Queues,
        );

        super::panes::render_annotation_pane(
            frame,
            right_rows[1],
            queue_state.current_annotation.as_deref(),
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.engine.current_step_index(),
            self.engine.total_steps(),
            self.engine.playback_state(),
            self.engine.speed(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Right | KeyCode::Char('s') => {
                self.engine.step();
                self.status_message = match self.engine.playback_state() {
                    PlaybackState::Finished => "Reached the end".to_string(),
                    _ => "Stepped forward".to_string(),
                };
                self.output_scroll = usize::MAX;
            }
            KeyCode::Char(' ') => {
                // Toggle play/pause (with 200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    match self.engine.playback_state() {
                        PlaybackState::Playing => {
                            self.engine.pause();
                            self.status_message = "Paused".to_string();
                        }
                        PlaybackState::Finished => {
                            self.status_message =
                                "Playback finished, press r to reset".to_string();
                        }
                        _ => {
                            self.engine.play();
                            self.status_message = "Playing...".to_string();
                        }
                    }
                }
            }
            KeyCode::Char('r') => {
                self.engine.reset();
                self.source_scroll = 0;
                self.output_scroll = 0;
                self.status_message = "Reset".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = (self.engine.speed() + 1).min(MAX_SPEED);
                self.engine.set_speed(speed);
                self.status_message = format!("Speed x{}", speed);
            }
            KeyCode::Char('-') => {
                let speed = self.engine.speed().saturating_sub(1).max(MIN_SPEED);
                self.engine.set_speed(speed);
                self.status_message = format!("Speed x{}", speed);
            }
            KeyCode::Enter => {
                // Jump to the end of the trace
                self.engine.pause();
                while self.engine.playback_state() != PlaybackState::Finished {
                    self.engine.step();
                }
                self.status_message = "Jumped to end".to_string();
                self.output_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.engine.reset();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('l') => {
                self.reload_source();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
                FocusedPane::Queues => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
                FocusedPane::Queues => {}
            },
            _ => {}
        }
    }

    /// Reload the source file from disk and recompile.
    fn reload_source(&mut self) {
        let Some(path) = &self.source_path else {
            self.status_message = "No source file to reload".to_string();
            return;
        };
        match std::fs::read_to_string(path) {
            Ok(text) => {
                self.engine.load_source(&text);
                self.source = text;
                self.source_scroll = 0;
                self.output_scroll = 0;
                self.status_message = format!("Reloaded {}", path.display());
            }
            Err(e) => {
                self.status_message = format!("Reload failed: {}", e);
            }
        }
    }
}
