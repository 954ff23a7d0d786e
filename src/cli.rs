use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "assetsift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Move asset files into a mirrored destination tree")]
#[command(
    long_about = "AssetSift walks a source directory, picks out asset files by extension \
                  (skipping `~` backups and editor files), copies each one to the same \
                  relative path under the destination directory and deletes the original. \
                  Missing directories are asked for interactively."
)]
#[command(after_help = "EXAMPLES:\n  \
    assetsift\n  \
    assetsift Assets/Art Sorted/Art\n  \
    assetsift Assets Export --extensions .png,.tga --dry-run\n  \
    assetsift Assets Export --config sift.toml -v")]
pub struct Cli {
    /// Directory to drain of matching files (prompted for when omitted)
    pub source: Option<PathBuf>,

    /// Directory receiving the mirrored files (prompted for when omitted)
    pub destination: Option<PathBuf>,

    /// Extensions to move (comma-separated, matched anywhere in the file name)
    #[arg(
        short,
        long,
        help = "Extensions to move, comma-separated (e.g., .png,.fbx)"
    )]
    pub extensions: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Carry the source modification time onto each copy
    #[arg(long, help = "Keep source modification times on copies (true/false)")]
    pub preserve_mtime: Option<bool>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only the per-file lines and errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be moved without touching any file)
    #[arg(long, help = "List the files that would move without moving them")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_extensions(self.extensions.clone())
            .with_preserve_modified_time(self.preserve_mtime)
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
