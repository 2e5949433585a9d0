// Network quiz: guess shortest path lengths and maximum flows.
// Type commands into the prompt and press Enter; Esc quits.

mod app;
mod cli;
mod command;
mod console_interface;
mod core;
mod error;
mod logging;
mod models;
mod oracle;
mod quiz;
#[cfg(test)]
mod test;

use std::io;

use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use crate::app::App;
use crate::cli::Cli;
use crate::console_interface::{
    ConsoleInput, cleanup_terminal, handle_input, render_quiz, setup_terminal,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_file)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(cli.config(), rng);
    if let Some(page) = cli.page {
        app.open(page)?;
    }
    info!(seed = cli.seed, page = ?cli.page, "quiz started");

    let mut terminal = setup_terminal()?;
    let result = run_interactive(&mut app, &mut terminal);
    cleanup_terminal()?;

    if let Err(err) = &result {
        error!(error = %err, "quiz loop failed");
    }
    result
}

fn run_interactive<R: Rng>(
    app: &mut App<R>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    render_quiz(terminal, &app.render_state(&input))?;

    loop {
        match handle_input()? {
            ConsoleInput::Quit => break,
            ConsoleInput::Char(c) => input.push(c),
            ConsoleInput::Backspace => {
                input.pop();
            }
            ConsoleInput::Submit => {
                app.handle_line(&input);
                input.clear();
                if app.should_quit() {
                    break;
                }
            }
            ConsoleInput::Timeout | ConsoleInput::Unknown => continue,
        }
        render_quiz(terminal, &app.render_state(&input))?;
    }

    info!("quiz closed");
    Ok(())
}
