//! Command-line configuration for the quiz console.

use std::path::PathBuf;

use clap::Parser;

use crate::app::{QuizConfig, QuizPage};
use crate::core::{DEFAULT_RANDOM_NODES, MAX_BUILDER_NODES};

/// Top-level options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "network-quiz",
    about = "Guess shortest path lengths and maximum flows on small graphs."
)]
pub struct Cli {
    /// Quiz to open straight away instead of the home menu.
    #[arg(long, value_enum)]
    pub page: Option<QuizPage>,

    /// Node count for randomly generated graphs (clamped per quiz kind).
    #[arg(long, default_value_t = DEFAULT_RANDOM_NODES)]
    pub nodes: usize,

    /// Seed for the random generator; fresh entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Node limit for self-built graphs.
    #[arg(
        long = "max-nodes",
        default_value_t = MAX_BUILDER_NODES as u64,
        value_parser = clap::value_parser!(u64).range(2..=MAX_BUILDER_NODES as u64),
    )]
    pub max_nodes: u64,

    /// File receiving structured logs; the terminal belongs to the UI.
    #[arg(long = "log-file", default_value = "exports/quiz.log")]
    pub log_file: PathBuf,

    /// Directory for `export` snapshots.
    #[arg(long = "export-dir", default_value = "exports")]
    pub export_dir: PathBuf,
}

impl Cli {
    pub fn config(&self) -> QuizConfig {
        QuizConfig {
            max_builder_nodes: usize::try_from(self.max_nodes).unwrap_or(MAX_BUILDER_NODES),
            random_nodes: self.nodes,
            export_dir: self.export_dir.clone(),
        }
    }
}
