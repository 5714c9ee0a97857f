use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write `output` when it resolves to one of the input files.
///
/// Script names come from export data, so a peer address plus a custom
/// extension can collide with the template or the export itself.
pub fn ensure_output_not_same(output: &Path, inputs: &[&Path]) -> Result<()> {
    let out_norm = resolve(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for input in inputs {
        // inputs were already read, so they exist
        let Ok(in_norm) = input.canonicalize() else {
            continue;
        };
        if out_norm == in_norm {
            bail!(
                "refusing to overwrite input file: output {} matches input {}",
                output.display(),
                input.display()
            );
        }
    }
    Ok(())
}

// Canonicalizes the parent directory so `..` is resolved even when the
// output file does not exist yet.
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir().context("current_dir")?,
    };
    let parent = parent
        .canonicalize()
        .with_context(|| format!("canonicalize {}", parent.display()))?;
    Ok(match path.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    })
}
