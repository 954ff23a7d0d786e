use crate::config::FilterConfig;
use crate::error::{Result, SiftError};
use crate::scanner::file_filter::{FileFilter, FilterDecision};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct AssetFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl AssetFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let filename = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            source_path,
            relative_path,
            filename,
            size,
        }
    }

    /// Where this file lands under `dest_root`.
    pub fn destination_in(&self, dest_root: &Path) -> PathBuf {
        dest_root.join(&self.relative_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatistics {
    pub files_seen: usize,
    pub files_matched: usize,
    pub skipped_backup: usize,
    pub skipped_editor: usize,
    pub skipped_no_match: usize,
    pub bytes_matched: u64,
}

impl ScanStatistics {
    fn record(&mut self, decision: FilterDecision) {
        self.files_seen += 1;
        match decision {
            FilterDecision::Include => self.files_matched += 1,
            FilterDecision::SkipBackup => self.skipped_backup += 1,
            FilterDecision::SkipEditor => self.skipped_editor += 1,
            FilterDecision::SkipNoMatch => self.skipped_no_match += 1,
        }
    }

    pub fn files_skipped(&self) -> usize {
        self.skipped_backup + self.skipped_editor + self.skipped_no_match
    }

    pub fn display_summary(&self) -> String {
        format!(
            "Scan Results:\n  Files seen: {}\n  Matched: {} ({} bytes)\n  Skipped backups (~): {}\n  Skipped editor files: {}\n  Skipped without extension match: {}\n",
            self.files_seen,
            self.files_matched,
            self.bytes_matched,
            self.skipped_backup,
            self.skipped_editor,
            self.skipped_no_match
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub assets: Vec<AssetFile>,
    pub statistics: ScanStatistics,
}

pub struct AssetScanner {
    filter: FileFilter,
}

impl AssetScanner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// Enumerate the whole tree under `root` and keep the files the filter
    /// accepts. Any walk error aborts the scan.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<ScanOutcome> {
        let root_path = root.as_ref();
        check_source_root(root_path)?;

        let mut outcome = ScanOutcome::default();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| SiftError::walk(root_path, e))?;

            if !is_candidate_file(&entry) {
                continue;
            }

            let filename = entry.file_name().to_string_lossy();
            let decision = self.filter.evaluate(&filename);
            outcome.statistics.record(decision);

            if !decision.is_included() {
                tracing::debug!(path = %entry.path().display(), reason = %decision, "skipping");
                continue;
            }

            let relative_path = calculate_relative_path(entry.path(), root_path)?;
            // Size is informational; a dangling link still gets listed and
            // fails when it is copied.
            let size = fs::metadata(entry.path()).map(|m| m.len()).unwrap_or(0);

            outcome.statistics.bytes_matched += size;
            outcome
                .assets
                .push(AssetFile::new(entry.path().to_path_buf(), relative_path, size));
        }

        Ok(outcome)
    }
}

fn check_source_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SiftError::SourceNotFound {
            path: root.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => SiftError::Permission {
            path: root.to_path_buf(),
        },
        _ => SiftError::Io(e),
    })?;

    if !metadata.is_dir() {
        return Err(SiftError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    Ok(())
}

// Regular files, plus symlinks that do not resolve to a directory.
fn is_candidate_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && !entry.path().is_dir()
}

fn calculate_relative_path(file_path: &Path, root_path: &Path) -> Result<PathBuf> {
    let relative = file_path
        .strip_prefix(root_path)
        .map_err(|_| SiftError::InvalidPath {
            path: format!(
                "Cannot calculate relative path for {} from root {}",
                file_path.display(),
                root_path.display()
            ),
        })?;

    Ok(relative.to_path_buf())
}
