//! `main.tf` / `variables.tf` scaffolds.
//!
//! The templates are static; they consume the three variables written to
//! `terraform.tfvars`. Existing files are never overwritten since users are
//! expected to edit them.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::write_error;
use crate::error::EmitError;

pub const MAIN_TF: &str = include_str!("../../templates/main.tf");
pub const VARIABLES_TF: &str = include_str!("../../templates/variables.tf");

/// Scaffold file names with their contents.
pub const SCAFFOLDS: [(&str, &str); 2] = [("main.tf", MAIN_TF), ("variables.tf", VARIABLES_TF)];

/// Create `path` with `contents` unless it already exists.
///
/// Returns `false` when the file was already there.
pub fn write_if_absent(path: &Path, contents: &str) -> Result<bool, EmitError> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(write_error(path, e)),
    };

    file.write_all(contents.as_bytes())
        .map_err(|e| write_error(path, e))?;
    Ok(true)
}
