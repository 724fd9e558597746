//! Directive parsing: the first line of a template file may carry a
//! `#!yaml-readme` header describing how the generator should be invoked
//! and where its output belongs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

/// Line prefix marking a generator directive (trailing space included).
pub const MARKER: &str = "#!yaml-readme ";

/// Program token every translated command starts with.
const PROGRAM: &str = "yaml-readme";

/// A translated directive: a ready-to-run command line, and the destination
/// path for the generated document (empty when the directive carries no
/// `--output`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub command: String,
    pub output: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// A recognized flag appeared as the last token, with no value after it.
    #[error("malformed directive: flag `{flag}` has no value")]
    MalformedDirective { flag: String },
}

/// Translate a directive line into a command string and an output path.
///
/// Only the first occurrence of the marker is stripped; a line without the
/// marker is interpreted as-is. Tokens are separated by runs of ASCII
/// whitespace, so consecutive separators never produce an empty value.
/// Recognized flags consume the following token as their value: `-p` and
/// `--output` values are prefixed with `base_dir`, `--group-by` and
/// `--sort-by` pass through verbatim, and `--output` is diverted into the
/// returned output path instead of the command. Anything else is skipped.
pub fn translate(
    metadata: &str,
    base_dir: &str,
    target_path: &str,
) -> Result<Translation, DirectiveError> {
    let metadata = metadata.replacen(MARKER, "", 1);

    let mut commands = vec![
        PROGRAM.to_string(),
        "-t".to_string(),
        target_path.to_string(),
    ];
    let mut output = String::new();
    let items: Vec<&str> = metadata.split_whitespace().collect();

    let mut i = 0;
    while i < items.len() {
        let item = items[i];
        match item {
            "-p" | "--output" | "--group-by" | "--sort-by" => {
                let value = *items
                    .get(i + 1)
                    .ok_or_else(|| DirectiveError::MalformedDirective {
                        flag: item.to_string(),
                    })?;
                match item {
                    "-p" => {
                        commands.push("-p".to_string());
                        commands.push(format!("{base_dir}/{value}"));
                    }
                    "--output" => output = format!("{base_dir}/{value}"),
                    _ => {
                        commands.push(item.to_string());
                        commands.push(value.to_string());
                    }
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(Translation {
        command: commands.join(" "),
        output,
    })
}

/// Read the directive from the first line of `path`, if it carries one.
pub fn read_directive(path: &Path) -> Result<Option<String>> {
    let file = File::open(path)?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;

    let line = first_line.trim_end_matches(['\r', '\n']);
    if line.starts_with(MARKER) {
        Ok(Some(line.to_string()))
    } else {
        Ok(None)
    }
}
