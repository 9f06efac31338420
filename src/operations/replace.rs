use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use glob::Pattern;
use log::{info, warn};

use crate::common::TOTAL_STEPS;
use crate::common::errors::{ReplaceError, ReplaceResult};
use crate::config::{ReplaceStrategy, ReplacerConfig};
use crate::operations::scan::{Candidate, find_candidates, sort_newest_first};
use crate::utils::PathExt;

/// Result of a successful replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Candidate that now lives under the target name.
    pub source: PathBuf,
    pub target: PathBuf,
    /// Whether an older target file existed and was replaced.
    pub removed_previous: bool,
    /// Older candidates left untouched, newest first.
    pub passed_over: Vec<PathBuf>,
}

pub struct Replacer {
    config: ReplacerConfig,
    pattern: Pattern,
}

impl Replacer {
    pub fn new(config: ReplacerConfig) -> ReplaceResult<Self> {
        let pattern =
            Pattern::new(&config.pattern).map_err(|source| ReplaceError::InvalidPattern {
                pattern: config.pattern.clone(),
                source,
            })?;
        if !is_plain_file_name(&config.target) {
            return Err(ReplaceError::InvalidTarget {
                target: config.target.clone(),
            });
        }
        Ok(Self { config, pattern })
    }

    /// Scan, select the newest candidate, retire the old target and move the
    /// candidate into place. Every failure is terminal.
    pub fn run(&self) -> ReplaceResult<ReplaceOutcome> {
        let start_time = Instant::now();
        let target = self.config.target_path();

        let mut candidates =
            find_candidates(&self.config.directory, &self.pattern, &self.config.target)?;
        if candidates.is_empty() {
            return Err(ReplaceError::NotFound {
                directory: self.config.directory.clone(),
                pattern: self.config.pattern.clone(),
            });
        }

        if candidates.len() > 1 {
            sort_newest_first(&mut candidates);
            warn!("{}", candidate_listing(&candidates));
        }

        let source = candidates.remove(0).path;
        let passed_over = candidates
            .into_iter()
            .map(|candidate| candidate.path)
            .collect();

        let removed_previous = match self.config.strategy {
            ReplaceStrategy::DeleteThenRename => remove_target(&target)?,
            ReplaceStrategy::Overwrite => inspect_target(&target)?,
        };

        info!(
            step = &*step(2);
            "Renaming {} -> {}",
            source.display_name(),
            target.display_name()
        );
        rename_source(&source, &target)?;
        info!(duration = &*format!("{:?}", start_time.elapsed()); "Done");

        Ok(ReplaceOutcome {
            source,
            target,
            removed_previous,
            passed_over,
        })
    }
}

fn step(n: usize) -> String {
    format!("{}/{}", n, TOTAL_STEPS)
}

/// One warning body: a header line, then one line per candidate in order.
fn candidate_listing(candidates: &[Candidate]) -> String {
    let mut listing = format!(
        "Found {} matching files, using the newest:",
        candidates.len()
    );
    for candidate in candidates {
        listing.push_str(&format!(
            "\n  - {} (modified {})",
            candidate.path.display_name(),
            format_modified(candidate)
        ));
    }
    listing
}

fn format_modified(candidate: &Candidate) -> String {
    DateTime::<Local>::from(candidate.modified)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path.file_name().is_some_and(|file_name| file_name == path.as_os_str())
}

/// Delete the existing target. Returns whether there was one.
fn remove_target(target: &Path) -> ReplaceResult<bool> {
    info!(step = &*step(1); "Deleting {}", target.display_name());
    match fs::remove_file(target) {
        Ok(()) => {
            info!("Deleted");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("{} does not exist, skipping", target.display_name());
            Ok(false)
        }
        Err(source) => Err(ReplaceError::Deletion {
            path: target.to_path_buf(),
            source,
        }),
    }
}

/// Overwrite mode keeps the old target until the rename swaps it out.
fn inspect_target(target: &Path) -> ReplaceResult<bool> {
    info!(step = &*step(1); "Checking {}", target.display_name());
    match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.is_dir() => Err(ReplaceError::Deletion {
            path: target.to_path_buf(),
            source: io::Error::other("target is a directory and cannot be overwritten"),
        }),
        Ok(_) => {
            info!("Will be overwritten in place");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("{} does not exist, nothing to overwrite", target.display_name());
            Ok(false)
        }
        Err(source) => Err(ReplaceError::Deletion {
            path: target.to_path_buf(),
            source,
        }),
    }
}

fn rename_source(source: &Path, target: &Path) -> ReplaceResult<()> {
    fs::rename(source, target).map_err(|err| ReplaceError::Rename {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: err,
    })
}
