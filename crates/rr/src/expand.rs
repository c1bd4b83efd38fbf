//! Directory parameters replaced by what lies below them.
use std::{collections::BTreeSet, path::Path};

use tracing::{debug, trace};
use walkdir::WalkDir;

use rr_core::filter::PatternSet;
use rr_model::{DirExpansion, Token};

use crate::input::InputError;

/// Expand every directory parameter according to `mode`.
///
/// Directories matching `exclude` are dropped whole. Anything that is not a
/// directory passes through unchanged.
pub fn expand_directories(
    tokens: Vec<Token>,
    mode: DirExpansion,
    exclude: &PatternSet,
) -> Result<Vec<Token>, InputError> {
    if !mode.is_enabled() {
        return Ok(tokens);
    }

    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        let root = Path::new(&token);
        if !root.is_dir() {
            out.push(token);
            continue;
        }
        if exclude.any_match(&token) {
            trace!(dir = %root.display(), "excluded directory dropped");
            continue;
        }

        let before = out.len();
        match mode {
            DirExpansion::Files => walk_files(root, &mut out)?,
            DirExpansion::LeafDirs => walk_leaf_dirs(root, &mut out)?,
            DirExpansion::None => {}
        }
        debug!(dir = %root.display(), found = out.len() - before, "directory expanded");
    }
    Ok(out)
}

fn walker(root: &Path) -> WalkDir {
    WalkDir::new(root).min_depth(1).sort_by_file_name()
}

fn walk_error(root: &Path, source: walkdir::Error) -> InputError {
    InputError::Walk {
        root: root.to_path_buf(),
        source,
    }
}

/// Every non-directory entry, in walk order.
///
/// Links are not descended, and a link resolving to a directory is skipped.
fn walk_files(root: &Path, out: &mut Vec<Token>) -> Result<(), InputError> {
    for entry in walker(root) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        let is_dir = if entry.path_is_symlink() {
            entry.path().is_dir()
        } else {
            entry.file_type().is_dir()
        };
        if !is_dir {
            out.push(entry.into_path().into_os_string());
        }
    }
    Ok(())
}

/// Directories below `root` that contain no directory, sorted.
fn walk_leaf_dirs(root: &Path, out: &mut Vec<Token>) -> Result<(), InputError> {
    let mut leaves = BTreeSet::new();
    for entry in walker(root) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            leaves.remove(parent);
        }
        leaves.insert(entry.into_path());
    }
    out.extend(leaves.into_iter().map(|p| p.into_os_string()));
    Ok(())
}
