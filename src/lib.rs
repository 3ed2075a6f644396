#![allow(clippy::module_inception)]

use std::{fs, path::Path, rc::Rc};

use crate::{
    config::Config,
    errors::errors::{Error, ErrorImpl, ErrorTip},
    verifier::{
        source::{FileSource, StrSource},
        verifier::Verifier,
    },
};

pub mod classifier;
pub mod config;
pub mod errors;
pub mod macros;
pub mod scope;
pub mod types;
pub mod verifier;

extern crate regex;

/// A 1-based line number within a named source. Line 0 means no particular line.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// Verifies the file at `path`. Paths not ending in the configured extension are rejected
/// without being opened.
pub fn verify_file(path: &Path, config: &Config) -> Result<(), Error> {
    if !config.accepts_path(path) {
        return Err(ErrorImpl::Io {
            message: String::from("Invalid file name"),
        }
        .at(Position::null()));
    }

    Verifier::new(FileSource::new(path), config.clone()).verify()?;
    Ok(())
}

pub fn verify_source(source: &str, config: &Config) -> Result<(), Error> {
    Verifier::new(StrSource::new(source), config.clone()).verify()?;
    Ok(())
}

/// The text of physical line `line_number` of `file`, without its line ending.
pub fn get_line_at_position(file: &Path, line_number: u32) -> Option<String> {
    let content = fs::read_to_string(file).ok()?;
    let index = (line_number as usize).checked_sub(1)?;

    content
        .lines()
        .nth(index)
        .map(|line| line.trim_end_matches('\r').to_string())
}


pub fn display_error(error: &Error, file: &Path) {
    /*
        Error: VariableNotDeclared
        -> file.sjava
           |
        20 | a = b;
           |
        NameError: variable "b" not declared (line 20)
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file.as_os_str().to_string_lossy());

    let line = error.get_position().0;
    if let Some(line_text) = get_line_at_position(file, line) {
        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        eprintln!("{:>padding$}", "|");
        eprintln!("{} | {}", line_string, line_text.trim());
        eprintln!("{:>padding$}", "|");
    }

    eprintln!("{}", error);
}
