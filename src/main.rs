// tasktty: Step-Through Event Loop Visualizer

mod compiler;
mod engine;
mod queue;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use compiler::DEFAULT_DEMO_SOURCE;
use engine::ExecutionEngine;
use ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    let (source, source_path): (String, Option<PathBuf>) = match args.get(1) {
        Some(path) => {
            if !Path::new(path).exists() {
                let program_name = args.first().map(|s| s.as_str()).unwrap_or("tasktty");
                eprintln!("Error: File '{}' not found", path);
                eprintln!();
                eprintln!("Usage: {} [file.js]", program_name);
                eprintln!();
                eprintln!("Run without arguments to step through the built-in demo,");
                eprintln!("or pass a snippet using console.log / setTimeout /");
                eprintln!("Promise.resolve().then / queueMicrotask /");
                eprintln!("requestAnimationFrame / requestIdleCallback.");
                std::process::exit(1);
            }
            (fs::read_to_string(path)?, Some(PathBuf::from(path)))
        }
        None => (DEFAULT_DEMO_SOURCE.to_string(), None),
    };

    // Compile the snippet into the step trace
    let engine = ExecutionEngine::from_source(&source);
    eprintln!(
        "Compiled {} execution steps from {} lines.",
        engine.total_steps(),
        source.lines().count()
    );
    if engine.total_steps() == 0 {
        eprintln!("Note: no recognized scheduling constructs; nothing to visualize.");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(engine, source, source_path);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
