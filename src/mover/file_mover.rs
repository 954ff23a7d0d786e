use crate::config::TransferConfig;
use crate::error::{Result, SiftError};
use crate::scanner::AssetFile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One file that reached (or in a dry run, would reach) the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Emitted after a file is copied and before the original is deleted.
#[derive(Debug, Clone, Copy)]
pub struct MoveEvent<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    pub bytes: u64,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct MoveProgress {
    pub files_moved: usize,
    pub bytes_moved: u64,
    pub moved: Vec<MovedFile>,
    pub start_time: Instant,
}

impl MoveProgress {
    pub fn new() -> Self {
        Self {
            files_moved: 0,
            bytes_moved: 0,
            moved: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, moved: MovedFile) {
        self.files_moved += 1;
        self.bytes_moved += moved.bytes;
        self.moved.push(moved);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

pub struct FileMover {
    preserve_modified_time: bool,
    buffer_size: usize,
    dry_run: bool,
}

impl FileMover {
    pub fn new() -> Self {
        Self::from_config(&TransferConfig::default())
    }

    pub fn from_config(config: &TransferConfig) -> Self {
        Self {
            preserve_modified_time: config.preserve_modified_time,
            buffer_size: config.buffer_size.max(4096), // Minimum 4KB buffer
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Move every asset under `dest_root`, one at a time. The first failure
    /// stops the run; files already moved stay moved.
    pub fn move_files(
        &self,
        assets: &[AssetFile],
        dest_root: &Path,
        on_move: Option<&dyn Fn(&MoveEvent)>,
    ) -> Result<MoveProgress> {
        let mut progress = MoveProgress::new();

        for asset in assets {
            let moved = self.move_asset(asset, dest_root, on_move)?;
            progress.record(moved);
        }

        Ok(progress)
    }

    fn move_asset(
        &self,
        asset: &AssetFile,
        dest_root: &Path,
        on_move: Option<&dyn Fn(&MoveEvent)>,
    ) -> Result<MovedFile> {
        let destination = asset.destination_in(dest_root);

        if self.dry_run {
            notify(on_move, &asset.source_path, &destination, asset.size, true);
            return Ok(MovedFile {
                source: asset.source_path.clone(),
                destination,
                bytes: asset.size,
            });
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| SiftError::create_dir(parent, e))?;
        }

        let bytes = self.copy_file(&asset.source_path, &destination)?;
        notify(on_move, &asset.source_path, &destination, bytes, false);

        fs::remove_file(&asset.source_path)
            .map_err(|e| SiftError::remove(&asset.source_path, e))?;

        tracing::info!(
            source = %asset.source_path.display(),
            destination = %destination.display(),
            bytes,
            "moved"
        );

        Ok(MovedFile {
            source: asset.source_path.clone(),
            destination,
            bytes,
        })
    }

    /// Copy the bytes of `source` over `dest`, replacing whatever is there.
    pub fn copy_file(&self, source: &Path, dest: &Path) -> Result<u64> {
        if is_same_file(source, dest) {
            return Err(SiftError::copy(
                source,
                dest,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "source and destination are the same file",
                ),
            ));
        }

        let source_file = fs::File::open(source).map_err(|e| SiftError::copy(source, dest, e))?;
        let dest_file = fs::File::create(dest).map_err(|e| SiftError::copy(source, dest, e))?;

        let mut reader = BufReader::with_capacity(self.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.buffer_size, dest_file);

        let total_bytes =
            io::copy(&mut reader, &mut writer).map_err(|e| SiftError::copy(source, dest, e))?;
        writer.flush().map_err(|e| SiftError::copy(source, dest, e))?;

        if self.preserve_modified_time {
            let stamped = fs::metadata(source)
                .and_then(|m| m.modified())
                .and_then(|modified_time| {
                    filetime::set_file_mtime(
                        dest,
                        filetime::FileTime::from_system_time(modified_time),
                    )
                });
            if let Err(e) = stamped {
                tracing::warn!(
                    destination = %dest.display(),
                    error = %e,
                    "could not carry over modification time"
                );
            }
        }

        Ok(total_bytes)
    }
}

impl Default for MoveProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FileMover {
    fn default() -> Self {
        Self::new()
    }
}

fn notify(
    on_move: Option<&dyn Fn(&MoveEvent)>,
    source: &Path,
    destination: &Path,
    bytes: u64,
    dry_run: bool,
) {
    if let Some(callback) = on_move {
        callback(&MoveEvent {
            source,
            destination,
            bytes,
            dry_run,
        });
    }
}

// Truncating the destination would wipe the source when both name the same
// file, whether through the same path or through a hard link.
fn is_same_file(source: &Path, dest: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        if let (Ok(a), Ok(b)) = (fs::metadata(source), fs::metadata(dest)) {
            return a.dev() == b.dev() && a.ino() == b.ino();
        }
    }

    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn create_asset(root: &Path, relative: &str, content: &str) -> AssetFile {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();

        AssetFile::new(path, PathBuf::from(relative), content.len() as u64)
    }

    #[test]
    fn test_move_preserves_relative_structure() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let dest_root = dest_dir.path().join("out");

        let asset = create_asset(source_dir.path(), "sub/dir/tex.png", "pixels");
        let mover = FileMover::new();

        let progress = mover.move_files(&[asset], &dest_root, None).unwrap();

        assert_eq!(progress.files_moved, 1);
        assert_eq!(progress.bytes_moved, 6);
        assert!(!source_dir.path().join("sub/dir/tex.png").exists());
        assert_eq!(
            fs::read_to_string(dest_root.join("sub/dir/tex.png")).unwrap(),
            "pixels"
        );
    }

    #[test]
    fn test_overwrites_existing_destination() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let asset = create_asset(source_dir.path(), "hero.fbx", "new");
        fs::write(dest_dir.path().join("hero.fbx"), "old and longer").unwrap();

        FileMover::new()
            .move_files(&[asset], dest_dir.path(), None)
            .unwrap();

        assert_eq!(
            fs::read_to_string(dest_dir.path().join("hero.fbx")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_callback_sees_each_move() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let assets = vec![
            create_asset(source_dir.path(), "a.png", "a"),
            create_asset(source_dir.path(), "b/c.mat", "cc"),
        ];

        let seen = RefCell::new(Vec::new());
        let callback: &dyn Fn(&MoveEvent) = &|event| {
            // The original is still present when the event fires
            assert!(event.source.exists());
            seen.borrow_mut()
                .push((event.destination.to_path_buf(), event.bytes));
        };

        FileMover::new()
            .move_files(&assets, dest_dir.path(), Some(callback))
            .unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (dest_dir.path().join("a.png"), 1),
                (dest_dir.path().join("b/c.mat"), 2),
            ]
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let dest_root = dest_dir.path().join("out");

        let asset = create_asset(source_dir.path(), "x/y.prefab", "prefab");
        let progress = FileMover::new()
            .with_dry_run(true)
            .move_files(&[asset], &dest_root, None)
            .unwrap();

        assert_eq!(progress.files_moved, 1);
        assert!(source_dir.path().join("x/y.prefab").exists());
        assert!(!dest_root.exists());
    }

    #[test]
    fn test_failure_stops_the_run() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let first = create_asset(source_dir.path(), "1.png", "one");
        let missing = AssetFile::new(
            source_dir.path().join("2.png"),
            PathBuf::from("2.png"),
            0,
        );
        let third = create_asset(source_dir.path(), "3.png", "three");

        let result = FileMover::new().move_files(&[first, missing, third], dest_dir.path(), None);

        assert!(matches!(result, Err(SiftError::Copy { .. })));
        assert!(dest_dir.path().join("1.png").exists());
        assert!(!source_dir.path().join("1.png").exists());
        assert!(source_dir.path().join("3.png").exists());
        assert!(!dest_dir.path().join("3.png").exists());
    }

    #[test]
    fn test_same_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let asset = create_asset(dir.path(), "keep.png", "data");

        let result = FileMover::new().move_files(&[asset], dir.path(), None);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(dir.path().join("keep.png")).unwrap(), "data");
    }

    #[cfg(unix)]
    #[test]
    fn test_hard_linked_destination_is_rejected() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let asset = create_asset(source_dir.path(), "tex.png", "precious");
        fs::hard_link(&asset.source_path, dest_dir.path().join("tex.png")).unwrap();

        let result = FileMover::new().move_files(&[asset], dest_dir.path(), None);

        assert!(matches!(result, Err(SiftError::Copy { .. })));
        assert_eq!(
            fs::read_to_string(source_dir.path().join("tex.png")).unwrap(),
            "precious"
        );
        assert_eq!(
            fs::read_to_string(dest_dir.path().join("tex.png")).unwrap(),
            "precious"
        );
    }

    // Runs only where directory permissions are enforced (not as root).
    #[cfg(unix)]
    #[test]
    fn test_undeletable_source_keeps_both_copies() {
        use std::os::unix::fs::PermissionsExt;

        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();
        let locked = source_dir.path().join("locked");

        let asset = create_asset(source_dir.path(), "locked/rock.fbx", "rock");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        if fs::write(locked.join("write-check"), "x").is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = FileMover::new().move_files(&[asset], dest_dir.path(), None);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(SiftError::Permission { path }) => assert_eq!(path, locked.join("rock.fbx")),
            other => panic!("expected a permission error, got {:?}", other.map(|p| p.files_moved)),
        }
        assert_eq!(
            fs::read_to_string(dest_dir.path().join("locked/rock.fbx")).unwrap(),
            "rock"
        );
        assert_eq!(fs::read_to_string(locked.join("rock.fbx")).unwrap(), "rock");
    }

    #[test]
    fn test_modified_time_is_carried_over() {
        let source_dir = TempDir::new().unwrap();
        let dest_dir = TempDir::new().unwrap();

        let asset = create_asset(source_dir.path(), "old.jpg", "jpg");
        let stamp = filetime::FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&asset.source_path, stamp).unwrap();

        FileMover::new()
            .move_files(&[asset], dest_dir.path(), None)
            .unwrap();

        let metadata = fs::metadata(dest_dir.path().join("old.jpg")).unwrap();
        assert_eq!(filetime::FileTime::from_last_modification_time(&metadata), stamp);
    }
}
