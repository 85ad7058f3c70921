use std::path::PathBuf;

use clap::{Args, Subcommand};
use eyre::Context;
use mtquest_arc::{Archive, ArchiveEntry, Container};

use super::Command;
use crate::cli::ArchiveInput;

mod extract;

/// Subcommand for working with ARC archives.
#[derive(Debug, Args)]
pub struct Arc {
    #[clap(subcommand)]
    command: ArcCommand,
}

#[derive(Debug, Subcommand)]
enum ArcCommand {
    /// Lists the entries of an archive.
    List {
        #[clap(flatten)]
        input: ArchiveInput,

        /// Only lists entries whose path matches this glob pattern.
        ///
        /// Backslashes in the pattern match the separators of entry
        /// paths literally.
        #[clap(long)]
        glob: Option<String>,
    },

    /// Decompresses all entries of an archive into a directory.
    Extract {
        #[clap(flatten)]
        input: ArchiveInput,

        /// The directory to extract into.
        ///
        /// If missing, a directory named after the archive will be
        /// created next to it.
        #[clap(short)]
        output: Option<PathBuf>,

        /// Writes the stored bytes without decompressing them.
        #[clap(long)]
        raw: bool,
    },
}

fn open(input: &ArchiveInput) -> eyre::Result<Archive> {
    Archive::open_with(&input.file, input.config())
        .with_context(|| format!("failed to open archive at '{}'", input.file.display()))
}

fn print_entry(entry: &ArchiveEntry) {
    println!(
        "{:08X} q{} {:>10} {:>10}  {}{}",
        entry.type_hash(),
        entry.quality(),
        entry.compressed_size(),
        entry.real_size(),
        entry.path,
        entry.extension(),
    );
}

impl Command for Arc {
    fn handle(self) -> eyre::Result<()> {
        match self.command {
            ArcCommand::List { input, glob } => {
                let archive = open(&input)?;

                match glob {
                    Some(pattern) => archive
                        .iter_glob(&pattern)
                        .with_context(|| format!("invalid glob pattern '{pattern}'"))?
                        .for_each(print_entry),
                    None => archive.entries().iter().for_each(print_entry),
                }

                Ok(())
            }

            ArcCommand::Extract { input, output, raw } => {
                let archive = open(&input)?;

                let output = match output {
                    Some(output) => output,
                    None => input.file.with_extension(""),
                };

                extract::extract_archive(&archive, &output, !raw)
            }
        }
    }
}
