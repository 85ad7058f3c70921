use clap::{Parser, Subcommand};

use crate::cmd::*;

mod args;
pub use args::*;

/// The CLI interface for the mtquest application.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The selected command.
    #[clap(subcommand)]
    pub command: MtquestCommand,

    #[clap(flatten)]
    pub verbosity: Verbosity,
}

/// The top-level commands supported by mtquest.
#[derive(Debug, Subcommand)]
pub enum MtquestCommand {
    Arc(arc::Arc),
    Hash(hash::Hash),
    Quest(quest::Quest),
}

impl Command for MtquestCommand {
    fn handle(self) -> eyre::Result<()> {
        match self {
            Self::Arc(arc) => arc.handle(),
            Self::Hash(hash) => hash.handle(),
            Self::Quest(quest) => quest.handle(),
        }
    }
}
