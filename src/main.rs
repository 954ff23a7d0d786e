use assetsift::{
    ui::prompt_for_roots_interactive, AssetSifter, Cli, OutputFormatter, OutputMode, SiftError,
};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    setup_logging();
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    let sifter = match AssetSifter::from_cli(&cli) {
        Ok(sifter) => sifter,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    // Ask for whatever the command line left out
    let (source, destination) =
        match prompt_for_roots_interactive(
            cli.source.clone(),
            cli.destination.clone(),
            cli.output_mode(),
        ) {
            Ok(roots) => roots,
            Err(e) => {
                sifter.handle_error(&e);
                return exit_code_for(&e);
            }
        };

    match sifter.run(&source, &destination) {
        Ok(report) => {
            sifter.output_formatter().print_sift_report(&report);
            0
        }
        Err(e) => {
            sifter.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &SiftError) -> i32 {
    match error {
        SiftError::Config { .. } => 2,
        SiftError::SourceNotFound { .. } | SiftError::NotADirectory { .. } => 3,
        SiftError::Permission { .. } => 4,
        _ => 1, // General error
    }
}

fn print_startup_error(cli: &Cli, error: &SiftError) {
    let mode = match cli.output_mode() {
        OutputMode::Json => OutputMode::Json,
        _ => OutputMode::Human,
    };
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}

// Diagnostics go to stderr; stdout is reserved for the move lines.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let config = SiftError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(exit_code_for(&config), 2);

        let missing = SiftError::SourceNotFound {
            path: PathBuf::from("x"),
        };
        assert_eq!(exit_code_for(&missing), 3);

        let denied = SiftError::Permission {
            path: PathBuf::from("x"),
        };
        assert_eq!(exit_code_for(&denied), 4);

        let io_error = SiftError::Io(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(exit_code_for(&io_error), 1);
    }
}
