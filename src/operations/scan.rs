use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::common::errors::{ReplaceError, ReplaceResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl Candidate {
    /// Newest first; equal timestamps fall back to ascending path.
    fn newest_first(a: &Candidate, b: &Candidate) -> Ordering {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.cmp(&b.path))
    }
}

/// List the regular files directly inside `directory` whose name matches
/// `pattern`, skipping the entry named `target`.
///
/// Symlinks are followed for the file-type check and modification time.
pub fn find_candidates(
    directory: &Path,
    pattern: &Pattern,
    target: &str,
) -> ReplaceResult<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| ReplaceError::Scan {
            path: err.path().unwrap_or(directory).to_path_buf(),
            source: io::Error::from(err),
        })?;

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name == target || !pattern.matches_with(name, MATCH_OPTIONS) {
            continue;
        }

        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            // Dangling symlink
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(ReplaceError::Scan {
                    path: entry.path().to_path_buf(),
                    source,
                });
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map_err(|source| ReplaceError::Scan {
            path: entry.path().to_path_buf(),
            source,
        })?;
        candidates.push(Candidate {
            path: entry.into_path(),
            modified,
        });
    }

    Ok(candidates)
}

/// Sort `candidates` newest first.
pub fn sort_newest_first(candidates: &mut [Candidate]) {
    candidates.sort_by(Candidate::newest_first);
}
