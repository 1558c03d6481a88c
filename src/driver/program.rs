#[cfg(test)]
mod tests;

use super::{map, TableError};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File inside the program directory holding the motion program
pub const PROGRAM_FILE: &str = "prog.txt";
/// File inside the program directory holding the point (parameter) table
pub const PARAMETER_FILE: &str = "pars.txt";
/// Name of a program loaded from the current directory
pub const DEFAULT_PROGRAM_NAME: &str = "DATA";

/// A motion program and its point table, ready to be uploaded
///
/// Both texts are stored with `\r\n` line endings, no matter what the files
/// on disk used.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProgramBundle {
    name: String,
    program: String,
    parameters: String,
}

impl ProgramBundle {
    /// Reads [`PROGRAM_FILE`] and [`PARAMETER_FILE`] from the directory `path`.
    ///
    /// The program is named after the last component of `path` in uppercase.
    /// An empty path reads from the current directory and names the program
    /// [`DEFAULT_PROGRAM_NAME`].
    ///
    /// # Errors
    /// [`TableError::ProgramFile`] naming the first file that couldn't be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        Ok(ProgramBundle {
            name: program_name(path),
            program: read_crlf(&path.join(PROGRAM_FILE))?,
            parameters: read_crlf(&path.join(PARAMETER_FILE))?,
        })
    }

    pub fn new(
        name: impl Into<String>,
        program: impl AsRef<str>,
        parameters: impl AsRef<str>,
    ) -> Self {
        ProgramBundle {
            name: name.into(),
            program: to_crlf(program.as_ref()),
            parameters: to_crlf(parameters.as_ref()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The program text preceded by its `NAME=` header line
    pub fn program_payload(&self) -> String {
        format!("{}{}\r\n{}", map::PROGRAM_NAME, self.name, self.program)
    }

    pub fn parameter_payload(&self) -> &str {
        &self.parameters
    }
}

/// Uppercased last component of `path`, [`DEFAULT_PROGRAM_NAME`] if there is none
///
/// Both `/` and `\` separate components, on every platform.
pub fn program_name(path: &Path) -> String {
    let is_separator = |c: char| c == '/' || c == '\\';
    let path = path.to_string_lossy();
    match path.trim_end_matches(is_separator).rsplit(is_separator).next() {
        Some(name) if !name.is_empty() => name.to_ascii_uppercase(),
        _ => DEFAULT_PROGRAM_NAME.to_string(),
    }
}

fn to_crlf(text: &str) -> String {
    text.lines().flat_map(|l| [l, "\r\n"]).collect()
}

fn read_crlf(path: &Path) -> Result<String, TableError> {
    let text = fs::read_to_string(path).map_err(|source| TableError::ProgramFile {
        path: PathBuf::from(path),
        source,
    })?;
    Ok(to_crlf(&text))
}
