//! Flattened Terraform variable models.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

/// Terraform resource type for access packages.
pub const PACKAGE_RESOURCE: &str = "azuread_access_package";

/// Terraform resource type for assignment policies.
pub const POLICY_RESOURCE: &str = "azuread_access_package_assignment_policy";

/// Terraform resource type for assignments.
pub const ASSIGNMENT_RESOURCE: &str = "azuread_access_package_assignment";

/// Entry of the `access_packages` variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageVars {
    pub catalog_id: String,
    pub description: String,
}

/// Entry of the `assignment_policies` variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyVars {
    pub access_package_key: String,
    pub duration_in_days: u32,
    pub request_approval: bool,
    pub approvers_primary: Vec<String>,
    pub approvers_secondary: Vec<String>,
}

/// Entry of the `assignments` variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentVars {
    pub access_package_key: String,
    pub target_id: String,
}

/// Everything one export run produces, ready to be written out.
///
/// Keys are not deduplicated: a later entry with the same key replaces the
/// earlier one. Import commands are kept for both.
#[derive(Debug, Default)]
pub struct ExportBundle {
    pub access_packages: BTreeMap<String, PackageVars>,
    pub assignment_policies: BTreeMap<String, PolicyVars>,
    pub assignments: BTreeMap<String, AssignmentVars>,
    /// Assignments per sanitized group name. Empty unless grouping is on.
    pub grouped_assignments: BTreeMap<String, BTreeMap<String, AssignmentVars>>,
    /// `terraform import` lines in the order the objects were fetched.
    pub import_commands: Vec<String>,
}

impl ExportBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, key: String, vars: PackageVars, graph_id: &str) {
        self.import_commands
            .push(import_command(PACKAGE_RESOURCE, &key, graph_id));
        if self.access_packages.insert(key.clone(), vars).is_some() {
            warn!("Access package key {} already exported, overwriting", key);
        }
    }

    pub fn add_policy(&mut self, key: String, vars: PolicyVars, graph_id: &str) {
        self.import_commands
            .push(import_command(POLICY_RESOURCE, &key, graph_id));
        if self.assignment_policies.insert(key.clone(), vars).is_some() {
            warn!("Assignment policy key {} already exported, overwriting", key);
        }
    }

    pub fn add_assignment(
        &mut self,
        key: String,
        vars: AssignmentVars,
        graph_id: &str,
        group: Option<String>,
    ) {
        self.import_commands
            .push(import_command(ASSIGNMENT_RESOURCE, &key, graph_id));
        if let Some(group) = group {
            self.grouped_assignments
                .entry(group)
                .or_default()
                .insert(key.clone(), vars.clone());
        }
        if self.assignments.insert(key.clone(), vars).is_some() {
            warn!("Assignment key {} already exported, overwriting", key);
        }
    }
}

/// `terraform import <resource>.<key> <id>`.
pub fn import_command(resource: &str, key: &str, graph_id: &str) -> String {
    format!("terraform import {}.{} {}", resource, key, graph_id)
}
