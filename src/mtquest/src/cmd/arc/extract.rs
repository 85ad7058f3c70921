use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use eyre::{bail, Context};
use mtquest_arc::{Archive, Container};

fn validate_extract_path(base: &Path, archive_path: &str) -> eyre::Result<PathBuf> {
    // Entry paths always use backslashes, regardless of platform.
    let normalized = archive_path.replace('\\', "/");
    let path = Path::new(&normalized);

    // Reject absolute paths outright.
    if path.is_absolute() {
        bail!("absolute path not allowed in archive: '{archive_path}'");
    }

    // Traverse the path while checking for directory escapes.
    let mut result = base.to_path_buf();
    let base_depth = base.components().count();

    for component in path.components() {
        match component {
            Component::Normal(c) => {
                result.push(c);
            }
            Component::ParentDir => {
                if result.components().count() <= base_depth {
                    bail!("path traversal detected in archive path '{archive_path}'");
                }
                result.pop();
            }
            Component::CurDir => (),
            Component::Prefix(_) | Component::RootDir => {
                bail!("invalid path component in archive path '{archive_path}'");
            }
        }
    }

    Ok(result)
}

/// Writes every entry of `archive` below `out`.
///
/// Files are named after the entry path plus the extension derived
/// from its type hash.
pub fn extract_archive(archive: &Archive, out: &Path, decompress: bool) -> eyre::Result<()> {
    // Validate everything up front so a bad entry leaves no partial output.
    let targets = archive
        .entries()
        .iter()
        .map(|e| validate_extract_path(out, &format!("{}{}", e.path, e.extension())))
        .collect::<eyre::Result<Vec<_>>>()?;

    for (entry, path) in archive.entries().iter().zip(targets) {
        let data = entry
            .data(decompress)
            .with_context(|| format!("failed to read entry '{}'", entry.path))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
        }

        fs::write(&path, &data)
            .with_context(|| format!("failed to write file '{}'", path.display()))?;
        log::debug!("Extracted '{}'", path.display());
    }

    log::info!("Extracted {} entries to '{}'", archive.len(), out.display());

    Ok(())
}

