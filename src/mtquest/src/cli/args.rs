use std::path::PathBuf;

use clap::{ArgAction, Args};
use mtquest_arc::ArchiveConfig;

/// Configures the verbosity of the builtin logger.
#[derive(Clone, Copy, Debug, Args)]
pub struct Verbosity {
    /// Configures the log verbosity of mtquest.
    ///
    /// `-v` is Debug, `-vv` is Trace.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Verbosity {
    /// Configures the global logger based on the settings.
    pub fn setup(self) -> eyre::Result<()> {
        let level = self.log_level();
        simple_logger::init_with_level(level)?;

        Ok(())
    }

    fn log_level(self) -> log::Level {
        match self.verbose {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}

/// An archive file given on the command line.
#[derive(Clone, Debug, Args)]
pub struct ArchiveInput {
    /// Path to the ARC file.
    pub file: PathBuf,

    /// Read and write the 0x8000 data alignment of older archives.
    #[clap(long)]
    pub legacy_alignment: bool,
}

impl ArchiveInput {
    /// The archive configuration selected by the flags.
    pub fn config(&self) -> ArchiveConfig {
        if self.legacy_alignment {
            ArchiveConfig::legacy()
        } else {
            ArchiveConfig::default()
        }
    }
}
