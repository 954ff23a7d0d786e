pub mod cli;
pub mod config;
pub mod error;
pub mod mover;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig, TransferConfig, DEFAULT_EXTENSIONS};
pub use error::{Result, SiftError, UserFriendlyError};

// Core functionality re-exports
pub use mover::{FileMover, MoveEvent, MoveProgress, MovedFile, SiftReport};
pub use scanner::{
    AssetFile, AssetScanner, FileFilter, FilterDecision, ScanOutcome, ScanStatistics,
};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Main library interface: scan a source tree and move the matching files
/// into a destination tree.
pub struct AssetSifter {
    config: Config,
    output_formatter: OutputFormatter,
    dry_run: bool,
}

impl AssetSifter {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Create an AssetSifter from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
        .with_dry_run(cli_args.dry_run))
    }

    /// Enumerate `source_root` completely, then move each matching file to
    /// the same relative path under `dest_root`. Stops at the first error.
    pub fn run(&self, source_root: &Path, dest_root: &Path) -> Result<SiftReport> {
        let formatter = &self.output_formatter;

        formatter.info(&format!("Scanning {}", source_root.display()));

        let scanner = AssetScanner::new(&self.config.filters);
        let outcome = scanner.scan_directory(source_root)?;
        formatter.print_scan_statistics(&outcome.statistics);

        tracing::debug!(
            source = %source_root.display(),
            matched = outcome.statistics.files_matched,
            skipped = outcome.statistics.files_skipped(),
            "scan finished"
        );

        if outcome.assets.is_empty() {
            formatter.warning("No matching files found");
        }

        let mover = FileMover::from_config(&self.config.transfer).with_dry_run(self.dry_run);
        let progress = mover.move_files(
            &outcome.assets,
            dest_root,
            Some(&|event| formatter.file_moved(event)),
        )?;

        if progress.files_moved > 0 && !self.dry_run {
            formatter.success(&format!(
                "Moved {} files to {}",
                progress.files_moved,
                dest_root.display()
            ));
        }

        Ok(SiftReport::new(
            source_root,
            dest_root,
            &self.config.filters.extensions,
            outcome.statistics,
            progress,
            self.dry_run,
        ))
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SiftError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Move every file under `source_dir` whose name passes the filter for
/// `extensions` to the mirrored path under `dest_dir`, deleting the original.
/// Prints one `Moving <source> to <destination>` line per file.
pub fn sift<S: AsRef<str>>(
    source_dir: &Path,
    dest_dir: &Path,
    extensions: &[S],
) -> Result<SiftReport> {
    let mut config = Config::default();
    config.filters.extensions = extensions.iter().map(|e| e.as_ref().to_string()).collect();
    config.validate()?;

    AssetSifter::new(config, OutputMode::Plain, 0, false).run(source_dir, dest_dir)
}
