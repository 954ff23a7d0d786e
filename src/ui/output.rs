use crate::error::{SiftError, UserFriendlyError};
use crate::mover::{MoveEvent, SiftReport};
use crate::scanner::ScanStatistics;
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// The per-file progress line. Printed in every verbosity, quiet included.
    pub fn file_moved(&self, event: &MoveEvent) {
        match self.mode {
            OutputMode::Human | OutputMode::Plain => {
                println!("{}", move_line(event.source, event.destination, event.dry_run));
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "move",
                    "source": event.source.display().to_string(),
                    "destination": event.destination.display().to_string(),
                    "bytes": event.bytes,
                    "dry_run": event.dry_run,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }));
            }
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    // User-friendly error handling. Everything goes to stderr so stdout only
    // ever carries the move lines.
    pub fn print_user_friendly_error(&self, error: &SiftError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_scan_statistics(&self, stats: &ScanStatistics) {
        self.debug(&stats.display_summary());
    }

    /// Human and plain summaries need `-v`; JSON mode always closes with the
    /// full report.
    pub fn print_sift_report(&self, report: &SiftReport) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human if self.should_show_message(1) => self.print_human_report(report),
            OutputMode::Plain if self.should_show_message(1) => self.print_plain_report(report),
            _ => {}
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow().bold()),
                MessageType::Info => (INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        let obj = serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if level == "error" {
            eprintln!("{}", serde_json::to_string(&obj).unwrap_or_else(|_| "{}".to_string()));
        } else {
            self.print_json_object(&obj);
        }
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &SiftReport) {
        let title = if report.dry_run {
            "Dry Run Summary"
        } else {
            "Sift Summary"
        };
        self.print_header(title);

        let verb = if report.dry_run { "Would move" } else { "Moved" };
        let files = report.total_files_moved.to_string();
        let bytes = format_bytes(report.total_bytes_moved);

        if self.use_colors {
            println!(
                "  {}: {} files ({})",
                verb,
                style(files).cyan().bold(),
                style(bytes).cyan().bold()
            );
        } else {
            println!("  {}: {} files ({})", verb, files, bytes);
        }

        println!("  From:       {}", report.source_root.display());
        println!("  To:         {}", report.destination_root.display());
        println!("  Extensions: {}", report.extensions.join(", "));
        println!(
            "  Left in place: {} ({} backups, {} editor files, {} unmatched)",
            report.statistics.files_skipped(),
            report.statistics.skipped_backup,
            report.statistics.skipped_editor,
            report.statistics.skipped_no_match
        );
        println!(
            "  Time taken: {}",
            format_duration(Duration::from_millis(report.duration_ms))
        );

        self.print_separator();
    }

    fn print_plain_report(&self, report: &SiftReport) {
        println!(
            "REPORT: {}",
            if report.dry_run { "Dry run completed" } else { "Sift completed" }
        );
        println!("Source: {}", report.source_root.display());
        println!("Destination: {}", report.destination_root.display());
        println!("Files: {}", report.total_files_moved);
        println!("Size: {} bytes", report.total_bytes_moved);
        println!("Skipped: {}", report.statistics.files_skipped());
        println!("Duration: {}ms", report.duration_ms);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

/// `Moving <source> to <destination>`, or `Would move ...` for a dry run.
pub fn move_line(source: &Path, destination: &Path, dry_run: bool) -> String {
    let verb = if dry_run { "Would move" } else { "Moving" };
    format!("{} {} to {}", verb, source.display(), destination.display())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
