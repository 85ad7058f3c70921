use std::{io, path::PathBuf};

use clap::{Args, Subcommand};
use eyre::Context;
use mtquest_arc::Container;
use mtquest_quest::{EntryOrdering, QuestArc};
use serde::Serialize;

use super::Command;
use crate::cli::ArchiveInput;

/// Subcommand for working with quest archives.
#[derive(Debug, Args)]
pub struct Quest {
    #[clap(subcommand)]
    command: QuestCommand,
}

#[derive(Debug, Subcommand)]
enum QuestCommand {
    /// Prints the link table of a quest and what each slot refers to.
    Links {
        #[clap(flatten)]
        input: ArchiveInput,

        /// Prints the table as JSON instead.
        #[clap(long)]
        json: bool,
    },

    /// Rewrites a quest archive with its entries in loader order.
    Reorder {
        #[clap(flatten)]
        input: ArchiveInput,

        /// The file to write the result to.
        ///
        /// If missing, the input file is replaced.
        #[clap(short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum SlotState {
    Unset,
    Empty,
    Missing,
    Resolved,
}

#[derive(Debug, Serialize)]
struct SlotReport {
    slot: String,
    kind: String,
    type_hash: u32,
    file: String,
    state: SlotState,
    entry: Option<String>,
}

fn open(input: &ArchiveInput, ordering: EntryOrdering) -> eyre::Result<QuestArc> {
    QuestArc::open_with(&input.file, input.config(), ordering)
        .with_context(|| format!("failed to open quest archive at '{}'", input.file.display()))
}

fn link_report(arc: &QuestArc) -> eyre::Result<Vec<SlotReport>> {
    let link = arc.load_link().context("failed to load quest link")?;
    let resolved = link.resolve(arc);

    let report = link
        .slots()
        .map(|(slot, res)| {
            let index = resolved.get(slot);
            let state = match index {
                Some(_) => SlotState::Resolved,
                None if res.is_unset() => SlotState::Unset,
                None if res.is_empty_resource() => SlotState::Empty,
                None => SlotState::Missing,
            };

            SlotReport {
                slot: slot.to_string(),
                kind: slot.kind().to_string(),
                type_hash: res.type_hash,
                file: res.file_name(),
                state,
                entry: index.map(|i| arc.entry(i).path.clone()),
            }
        })
        .collect();

    Ok(report)
}

impl Command for Quest {
    fn handle(self) -> eyre::Result<()> {
        match self.command {
            QuestCommand::Links { input, json } => {
                let arc = open(&input, EntryOrdering::Preserve)?;
                let report = link_report(&arc)?;

                if json {
                    serde_json::to_writer_pretty(io::stdout().lock(), &report)?;
                    println!();
                    return Ok(());
                }

                for r in &report {
                    println!(
                        "{:<12} {:08X} {:<15} {:?}{}",
                        r.slot,
                        r.type_hash,
                        r.file,
                        r.state,
                        r.entry.as_deref().map(|e| format!(" -> {e}")).unwrap_or_default(),
                    );
                }

                Ok(())
            }

            QuestCommand::Reorder { input, output } => {
                let mut arc = open(&input, EntryOrdering::Loader)?;
                if !arc.is_valid() {
                    log::warn!("'{}' does not look like a quest archive", input.file.display());
                }

                arc.save(output.as_deref())
                    .context("failed to save reordered archive")?;

                Ok(())
            }
        }
    }
}
