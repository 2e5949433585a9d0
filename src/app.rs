use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use clap::ValueEnum;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::command::{CommandError, QuizCommand, parse_command};
use crate::console_interface::{describe_home, describe_session};
use crate::core::{DEFAULT_RANDOM_NODES, GraphStore, MAX_BUILDER_NODES};
use crate::error::{GraphError, QuizError, Severity};
use crate::models::{Message, QuizRenderState, Tone};
use crate::quiz::{
    Evidence, QuizKind, QuizSession, RandomGraphGenerator, SessionId, SessionRegistry,
    get_json_data,
};

/// The six quizzes offered on the home menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum QuizPage {
    PathExample,
    FlowExample,
    PathBuilder,
    FlowBuilder,
    PathRandom,
    FlowRandom,
}

impl QuizPage {
    pub const ALL: [QuizPage; 6] = [
        QuizPage::PathExample,
        QuizPage::FlowExample,
        QuizPage::PathBuilder,
        QuizPage::FlowBuilder,
        QuizPage::PathRandom,
        QuizPage::FlowRandom,
    ];

    pub fn title(self) -> &'static str {
        match self {
            QuizPage::PathExample => "Shortest path (example)",
            QuizPage::FlowExample => "Max flow (example)",
            QuizPage::PathBuilder => "Shortest path (build your own)",
            QuizPage::FlowBuilder => "Max flow (build your own)",
            QuizPage::PathRandom => "Shortest path (random)",
            QuizPage::FlowRandom => "Max flow (random)",
        }
    }

    pub fn is_flow(self) -> bool {
        matches!(self, QuizPage::FlowExample | QuizPage::FlowBuilder | QuizPage::FlowRandom)
    }

    pub fn allows_building(self) -> bool {
        matches!(self, QuizPage::PathBuilder | QuizPage::FlowBuilder)
    }

    pub fn allows_generation(self) -> bool {
        matches!(self, QuizPage::PathRandom | QuizPage::FlowRandom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Quiz(QuizPage),
}

#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub max_builder_nodes: usize,
    pub random_nodes: usize,
    pub export_dir: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            max_builder_nodes: MAX_BUILDER_NODES,
            random_nodes: DEFAULT_RANDOM_NODES,
            export_dir: PathBuf::from("exports"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("there is no quiz number {number}; pick 1 to {}", QuizPage::ALL.len())]
    NoSuchQuiz { number: usize },
    #[error("you can't {action} on this page")]
    NotOnThisPage { action: &'static str },
    #[error("failed to write the export: {0}")]
    Export(#[from] io::Error),
    #[error("failed to serialise the session: {0}")]
    Serialise(#[from] serde_json::Error),
}

impl AppError {
    pub fn severity(&self) -> Severity {
        match self {
            AppError::Quiz(err) => err.severity(),
            AppError::Export(_) | AppError::Serialise(_) => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl From<GraphError> for AppError {
    fn from(err: GraphError) -> Self {
        AppError::Quiz(err.into())
    }
}

/// Everything one console user interacts with: the open sessions, the page
/// on screen and the feedback from the last command.
pub struct App<R: Rng> {
    registry: SessionRegistry,
    sessions: HashMap<QuizPage, SessionId>,
    page: Page,
    generator: RandomGraphGenerator<R>,
    config: QuizConfig,
    message: Option<Message>,
    should_quit: bool,
}

impl<R: Rng> App<R> {
    pub fn new(config: QuizConfig, rng: R) -> Self {
        App {
            registry: SessionRegistry::new(),
            sessions: HashMap::new(),
            page: Page::Home,
            generator: RandomGraphGenerator::new(rng),
            config,
            message: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Parses and runs one input line, keeping its outcome as the feedback message.
    pub fn handle_line(&mut self, line: &str) {
        let outcome = parse_command(line)
            .map_err(AppError::from)
            .and_then(|command| self.apply(command));
        self.message = Some(match outcome {
            Ok(message) => message,
            Err(err) => {
                warn!(input = line, error = %err, "command rejected");
                Message::new(Tone::from(err.severity()), err.to_string())
            }
        });
    }

    /// Switches to a quiz, opening its session the first time it is visited.
    pub fn open(&mut self, page: QuizPage) -> Result<(), AppError> {
        if !self.sessions.contains_key(&page) {
            let limit = if page.allows_building() {
                self.config.max_builder_nodes
            } else {
                MAX_BUILDER_NODES
            };
            let id = if page.is_flow() {
                self.registry.open_flow(GraphStore::with_node_limit(limit))
            } else {
                self.registry.open_path(GraphStore::with_node_limit(limit))
            };
            self.sessions.insert(page, id);
            self.populate_session(page)?;
        }
        self.page = Page::Quiz(page);
        info!(page = page.title(), "page opened");
        Ok(())
    }

    pub fn render_state<'a>(&'a self, input: &'a str) -> QuizRenderState<'a> {
        let (title, body) = match self.page {
            Page::Home => ("Network Quiz".to_string(), describe_home(&self.registry)),
            Page::Quiz(page) => {
                let body = match self.sessions.get(&page) {
                    Some(&id) if page.is_flow() => {
                        self.registry.flow(id).map(describe_session).unwrap_or_default()
                    }
                    Some(&id) => self.registry.path(id).map(describe_session).unwrap_or_default(),
                    None => String::new(),
                };
                (page.title().to_string(), body)
            }
        };
        QuizRenderState {
            title,
            body,
            message: self.message.as_ref(),
            input,
        }
    }

    fn apply(&mut self, command: QuizCommand) -> Result<Message, AppError> {
        match (self.page, command) {
            (_, QuizCommand::Quit) => {
                self.should_quit = true;
                Ok(Message::info("Bye!"))
            }
            (_, QuizCommand::Menu) => {
                self.page = Page::Home;
                Ok(Message::info("Pick a quiz by typing its number."))
            }
            (Page::Home, QuizCommand::Open(number)) => {
                let page = number
                    .checked_sub(1)
                    .and_then(|index| QuizPage::ALL.get(index))
                    .copied()
                    .ok_or(AppError::NoSuchQuiz { number })?;
                self.open(page)?;
                Ok(Message::info(opening_hint(page)))
            }
            (Page::Home, _) => Err(AppError::NotOnThisPage {
                action: "do that before picking a quiz",
            }),
            (Page::Quiz(page), QuizCommand::Close) => {
                let id = self.session_id_for(page)?;
                self.registry.close(id);
                self.sessions.remove(&page);
                self.page = Page::Home;
                Ok(Message::info(format!("{} closed.", page.title())))
            }
            (Page::Quiz(page), command) => self.run_on_session(page, command),
        }
    }

    fn session_id_for(&self, page: QuizPage) -> Result<SessionId, AppError> {
        self.sessions.get(&page).copied().ok_or(AppError::NotOnThisPage {
            action: "use a quiz that is not open",
        })
    }

    fn populate_session(&mut self, page: QuizPage) -> Result<(), AppError> {
        let id = self.session_id_for(page)?;
        let App {
            registry,
            generator,
            config,
            ..
        } = self;
        if page.is_flow() {
            populate(registry.flow_mut(id)?, generator, config, page)
        } else {
            populate(registry.path_mut(id)?, generator, config, page)
        }
    }

    fn run_on_session(
        &mut self,
        page: QuizPage,
        command: QuizCommand,
    ) -> Result<Message, AppError> {
        let id = self.session_id_for(page)?;
        let App {
            registry,
            generator,
            config,
            ..
        } = self;
        if page.is_flow() {
            run_command(registry.flow_mut(id)?, generator, config, page, command)
        } else {
            run_command(registry.path_mut(id)?, generator, config, page, command)
        }
    }
}

#[cfg(test)]
impl<R: Rng> App<R> {
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn session_id(&self, page: QuizPage) -> Option<SessionId> {
        self.sessions.get(&page).copied()
    }
}

/// Loads the graph a freshly opened quiz starts with.
fn populate<K: QuizKind, R: Rng>(
    session: &mut QuizSession<K>,
    generator: &mut RandomGraphGenerator<R>,
    config: &QuizConfig,
    page: QuizPage,
) -> Result<(), AppError> {
    if page.allows_generation() {
        let node_count = config
            .random_nodes
            .clamp(*K::RANDOM_NODES.start(), *K::RANDOM_NODES.end());
        session.replace_graph(K::random_graph(generator, node_count)?);
    } else if !page.allows_building() {
        session.replace_graph(K::example()?);
    }
    Ok(())
}

fn run_command<K: QuizKind, R: Rng>(
    session: &mut QuizSession<K>,
    generator: &mut RandomGraphGenerator<R>,
    config: &QuizConfig,
    page: QuizPage,
    command: QuizCommand,
) -> Result<Message, AppError> {
    match command {
        QuizCommand::AddNode(label) => {
            require(page.allows_building(), "add nodes")?;
            let label = match label {
                Some(label) => session.add_node(&label)?,
                None => session.add_lettered_node()?,
            };
            Ok(Message::success(format!("Added node {label}.")))
        }
        QuizCommand::AddEdge { from, to, value } => {
            require(page.allows_building(), "add edges")?;
            let attr: K::Attr = value.parse()?;
            let edge = session.add_edge(&from, &to, attr)?;
            let arrow = if session.graph().is_directed() { "->" } else { "-" };
            Ok(Message::success(format!(
                "Edge {} {arrow} {} is now {}.",
                edge.from, edge.to, edge.attr
            )))
        }
        QuizCommand::Ask {
            source,
            target,
            guess,
        } => {
            let verdict = session.submit(&source, &target, guess)?;
            let expected = verdict.expected_display();
            Ok(match &verdict.evidence {
                _ if verdict.correct => {
                    Message::success(format!("Correct! The answer is {expected}."))
                }
                Evidence::Flow {
                    sink_reachable: false,
                    ..
                } => Message::info(format!(
                    "No directed path leads from {source} to {target}, so the answer is 0."
                )),
                _ => Message::error(format!("Not quite. The answer is {expected}.")),
            })
        }
        QuizCommand::Generate(node_count) => {
            require(page.allows_generation(), "generate graphs")?;
            session.replace_graph(K::random_graph(generator, node_count)?);
            Ok(Message::success(format!(
                "Generated a new graph with {node_count} nodes. Pick a start and an end."
            )))
        }
        QuizCommand::Retry => {
            session.retry()?;
            Ok(Message::info("Same graph, new attempt."))
        }
        QuizCommand::Rebuild => {
            if page.allows_building() {
                session.rebuild();
                Ok(Message::info("Graph cleared. Start adding nodes."))
            } else if page.allows_generation() {
                session.rebuild();
                populate(session, generator, config, page)?;
                Ok(Message::info("Generated a fresh graph."))
            } else {
                Err(AppError::NotOnThisPage {
                    action: "rebuild the example graph",
                })
            }
        }
        QuizCommand::Export => {
            std::fs::create_dir_all(&config.export_dir)?;
            let path = config.export_dir.join("session.json");
            std::fs::write(&path, get_json_data(session)?)?;
            info!(path = %path.display(), "session exported");
            Ok(Message::info(format!("Session exported to {}.", path.display())))
        }
        QuizCommand::Open(_) => Err(AppError::NotOnThisPage {
            action: "open another quiz without going back to the menu",
        }),
        QuizCommand::Menu | QuizCommand::Quit | QuizCommand::Close => Err(AppError::NotOnThisPage {
            action: "do that here",
        }),
    }
}

fn require(allowed: bool, action: &'static str) -> Result<(), AppError> {
    if allowed { Ok(()) } else { Err(AppError::NotOnThisPage { action }) }
}

fn opening_hint(page: QuizPage) -> String {
    match page {
        QuizPage::PathExample | QuizPage::FlowExample => {
            "Type `ask START END GUESS` to answer.".to_string()
        }
        QuizPage::PathBuilder | QuizPage::FlowBuilder => {
            "Add nodes with `node` and edges with `edge U V VALUE`, then `ask`.".to_string()
        }
        QuizPage::PathRandom | QuizPage::FlowRandom => {
            "A random graph is ready. `ask` about it, or `gen N` for another.".to_string()
        }
    }
}
