use crate::error::{Result, SiftError};
use crate::ui::OutputMode;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const SOURCE_PROMPT: &str = "Enter the source directory: ";
pub const DESTINATION_PROMPT: &str = "Enter the destination directory: ";

/// Print `message` without a newline and read one line back.
///
/// Only the trailing line terminator is removed; leading and trailing spaces
/// are part of the answer. End of input counts as an error.
pub fn prompt_line<R, W>(reader: &mut R, writer: &mut W, message: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{}", message)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(line)
}

/// Ask for whichever of the two roots is still missing, source first.
pub fn prompt_for_roots<R, W>(
    reader: &mut R,
    writer: &mut W,
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)>
where
    R: BufRead,
    W: Write,
{
    let source = match source {
        Some(path) => path,
        None => prompt_line(reader, writer, SOURCE_PROMPT)
            .map(PathBuf::from)
            .map_err(|e| SiftError::Prompt {
                what: "source directory".to_string(),
                source: e,
            })?,
    };

    let destination = match destination {
        Some(path) => path,
        None => prompt_line(reader, writer, DESTINATION_PROMPT)
            .map(PathBuf::from)
            .map_err(|e| SiftError::Prompt {
                what: "destination directory".to_string(),
                source: e,
            })?,
    };

    Ok((source, destination))
}

/// Terminal flavour of [`prompt_for_roots`] bound to stdin. Prompts go to
/// stdout, except in JSON mode where stdout carries only JSON and they go to
/// stderr.
pub fn prompt_for_roots_interactive(
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    mode: OutputMode,
) -> Result<(PathBuf, PathBuf)> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = prompt_writer(mode);
    prompt_for_roots(&mut reader, &mut writer, source, destination)
}

fn prompt_writer(mode: OutputMode) -> Box<dyn Write> {
    match mode {
        OutputMode::Json => Box::new(io::stderr()),
        OutputMode::Human | OutputMode::Plain => Box::new(io::stdout()),
    }
}
