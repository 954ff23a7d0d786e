use crate::mover::{MoveProgress, MovedFile};
use crate::scanner::ScanStatistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiftReport {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub dry_run: bool,
    pub extensions: Vec<String>,
    pub statistics: ScanStatistics,
    pub files: Vec<MovedFile>,
    pub total_files_moved: usize,
    pub total_bytes_moved: u64,
    pub duration_ms: u64,
    pub completed_at: DateTime<Utc>,
}

impl SiftReport {
    pub fn new(
        source_root: &Path,
        destination_root: &Path,
        extensions: &[String],
        statistics: ScanStatistics,
        progress: MoveProgress,
        dry_run: bool,
    ) -> Self {
        let duration_ms = progress.elapsed().as_millis() as u64;

        Self {
            source_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            dry_run,
            extensions: extensions.to_vec(),
            statistics,
            total_files_moved: progress.files_moved,
            total_bytes_moved: progress.bytes_moved,
            files: progress.moved,
            duration_ms,
            completed_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals_follow_progress() {
        let mut progress = MoveProgress::new();
        progress.record(MovedFile {
            source: PathBuf::from("src/a.png"),
            destination: PathBuf::from("dst/a.png"),
            bytes: 10,
        });
        progress.record(MovedFile {
            source: PathBuf::from("src/b.mat"),
            destination: PathBuf::from("dst/b.mat"),
            bytes: 5,
        });

        let report = SiftReport::new(
            Path::new("src"),
            Path::new("dst"),
            &[".png".to_string(), ".mat".to_string()],
            ScanStatistics::default(),
            progress,
            false,
        );

        assert_eq!(report.total_files_moved, 2);
        assert_eq!(report.total_bytes_moved, 15);
        assert_eq!(report.files.len(), 2);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = SiftReport::new(
            Path::new("src"),
            Path::new("dst"),
            &[".fbx".to_string()],
            ScanStatistics::default(),
            MoveProgress::new(),
            true,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["total_files_moved"], 0);
        assert_eq!(json["extensions"][0], ".fbx");
        assert!(report.is_empty());
    }
}
