//! `.tfvars` rendering.
//!
//! Maps are written as JSON objects, which Terraform accepts as HCL object
//! literals on the right-hand side of a variable assignment.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::TFVARS_FILE;
use crate::error::EmitError;
use crate::export::{AssignmentVars, ExportBundle};

fn assignment<T: Serialize>(name: &'static str, value: &T) -> Result<String, EmitError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| EmitError::Serialize(name, e))?;
    Ok(format!("{} = {}", name, json))
}

/// Render `terraform.tfvars` with all three variables.
pub fn render_tfvars(bundle: &ExportBundle) -> Result<String, EmitError> {
    Ok(format!(
        "{}\n\n{}\n\n{}\n",
        assignment("access_packages", &bundle.access_packages)?,
        assignment("assignment_policies", &bundle.assignment_policies)?,
        assignment("assignments", &bundle.assignments)?,
    ))
}

/// Render a per-group file holding only that group's assignments.
pub fn render_group_tfvars(
    assignments: &BTreeMap<String, AssignmentVars>,
) -> Result<String, EmitError> {
    Ok(format!("{}\n", assignment("assignments", assignments)?))
}

/// File name for a group. Path separators are replaced so the file always
/// lands in the output directory.
///
/// A group whose file would be `terraform.tfvars`, or that has an empty name,
/// gets a `group_` prefix so it never replaces the catalog file or becomes a
/// hidden `.tfvars`.
pub fn group_file_name(group: &str) -> String {
    let stem = group.replace(['/', '\\'], "_");
    let name = format!("{}.tfvars", stem);

    if stem.is_empty() || name == TFVARS_FILE {
        let renamed = format!("group_{}.tfvars", stem);
        warn!(
            "Group '{}' would be written as '{}', using '{}' instead",
            group, name, renamed
        );
        return renamed;
    }

    name
}
