use crate::app::QuizPage;
use crate::command::HELP;
use crate::models::{QuizRenderState, Tone};
use crate::quiz::{Evidence, QuizKind, QuizSession, SessionRegistry};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::fmt::Write;
use std::io;

pub fn setup_terminal()
-> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_quiz(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &QuizRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        let quiz_paragraph = Paragraph::new(state.body.as_str())
            .block(Block::default().borders(Borders::ALL).title(state.title.as_str()))
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        f.render_widget(quiz_paragraph, chunks[0]);

        let (feedback, color) = match state.message {
            Some(message) => (message.text.as_str(), tone_color(message.tone)),
            None => ("", Color::White),
        };
        let feedback_paragraph = Paragraph::new(feedback)
            .block(Block::default().borders(Borders::ALL).title("Feedback"))
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        f.render_widget(feedback_paragraph, chunks[1]);

        let input_paragraph = Paragraph::new(format!("> {}", state.input))
            .block(Block::default().borders(Borders::ALL).title("Command"))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(input_paragraph, chunks[2]);

        let instruction_paragraph = Paragraph::new(format!("{HELP} | Esc to quit"))
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[3]);
    })?;
    Ok(())
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Info => Color::Cyan,
        Tone::Warning => Color::Yellow,
        Tone::Error => Color::Red,
    }
}

pub fn describe_home(registry: &SessionRegistry) -> String {
    let mut result = String::from("Solve shortest path and max flow puzzles.\n\n");
    for (index, page) in QuizPage::ALL.iter().enumerate() {
        let _ = writeln!(result, "  {}. {}", index + 1, page.title());
    }
    result.push_str("\nType a number and press Enter.");
    if !registry.is_empty() {
        let _ = write!(
            result,
            "\n{} quiz(zes) in progress; `close` inside one discards it.",
            registry.len()
        );
    }
    result
}

/// Plain-text view of a session: nodes, edges, state and the last verdict.
pub fn describe_session<K: QuizKind>(session: &QuizSession<K>) -> String {
    let graph = session.graph();
    let arrow = if graph.is_directed() { "->" } else { "-" };
    let mut result = String::new();

    if graph.is_empty() {
        result.push_str("Nodes: (none yet)\n");
    } else {
        let nodes: Vec<&str> = graph.nodes().collect();
        let _ = writeln!(
            result,
            "Nodes ({}/{}): {}",
            nodes.len(),
            graph.node_limit(),
            nodes.join(", ")
        );
    }

    result.push_str("Edges:\n");
    for edge in graph.edges() {
        let _ = writeln!(result, "  {} {arrow} {} : {}", edge.from, edge.to, edge.attr);
    }

    let _ = writeln!(result, "\nState: {}", session.state().name());
    if let (Some(query), Some(verdict)) = (session.query(), session.verdict()) {
        let _ = writeln!(
            result,
            "Asked {} {arrow} {}, guessed {}: {} (answer {})",
            query.source,
            query.target,
            query.guess,
            if verdict.correct { "correct" } else { "wrong" },
            verdict.expected_display()
        );
        match &verdict.evidence {
            Evidence::Path { nodes } => {
                let _ = writeln!(result, "Shortest path: {}", nodes.join(" -> "));
            }
            Evidence::Flow {
                sink_reachable: false,
                ..
            } => result.push_str("No directed path reaches the sink.\n"),
            Evidence::Flow { edges, .. } => {
                result.push_str("Flow (used/capacity):\n");
                for edge in edges {
                    let _ = writeln!(
                        result,
                        "  {} -> {} : {}/{}",
                        edge.from, edge.to, edge.flow, edge.capacity
                    );
                }
            }
        }
        result.push_str("`retry` for another attempt, `rebuild` for a new graph.\n");
    } else {
        let (source, target) = K::EXAMPLE_ENDPOINTS;
        if graph.contains(source) && graph.contains(target) {
            let _ = writeln!(result, "Try: ask {source} {target} <guess>");
        }
    }
    result
}

pub enum ConsoleInput {
    Char(char),
    Backspace,
    Submit,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    ConsoleInput::Quit
                }
                KeyCode::Enter => ConsoleInput::Submit,
                KeyCode::Backspace => ConsoleInput::Backspace,
                KeyCode::Char(c) => ConsoleInput::Char(c),
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}
