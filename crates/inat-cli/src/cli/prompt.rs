//! Interactive CSV path prompt.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const PROMPT: &str = "Please enter the full path to your .csv file: ";

/// Prints the prompt to `output` and reads one line from `input`.
pub fn ask_csv_path<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PathBuf> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no path entered");
    }
    Ok(clean_path_input(&line))
}

/// Trims whitespace and one pair of surrounding quotes (left by drag-and-drop or "copy as path").
pub fn clean_path_input(raw: &str) -> PathBuf {
    let s = raw.trim();
    let s = ['"', '\'']
        .iter()
        .find_map(|q| s.strip_prefix(*q).and_then(|r| r.strip_suffix(*q)))
        .unwrap_or(s);
    PathBuf::from(s)
}
