//! Graph data models for entitlement management.
//!
//! Only the fields the export reads are modelled; everything else in the
//! beta payloads is ignored.

use serde::Deserialize;

/// Default assignment duration when a policy does not set one.
pub const DEFAULT_DURATION_IN_DAYS: u32 = 30;

/// An access package from `/identityGovernance/entitlementManagement/accessPackages`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackage {
    pub id: String,
    pub catalog_id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl AccessPackage {
    /// Description, or empty if Graph returned none.
    pub fn description_or_empty(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

/// An assignment policy attached to an access package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPolicy {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub duration_in_days: Option<u32>,
    #[serde(default)]
    pub request_approval_settings: Option<RequestApprovalSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestApprovalSettings {
    #[serde(default)]
    pub is_approval_required: Option<bool>,
    #[serde(default)]
    pub approval_stages: Option<Vec<ApprovalStage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStage {
    #[serde(default)]
    pub primary_approvers: Vec<Approver>,
    #[serde(default)]
    pub escalation_approvers: Vec<Approver>,
}

/// A user set in an approval stage. Only subject-bound approvers carry an `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct Approver {
    #[serde(default)]
    pub id: Option<String>,
}

impl AssignmentPolicy {
    pub fn duration_in_days(&self) -> u32 {
        self.duration_in_days.unwrap_or(DEFAULT_DURATION_IN_DAYS)
    }

    pub fn request_approval(&self) -> bool {
        self.request_approval_settings
            .as_ref()
            .and_then(|s| s.is_approval_required)
            .unwrap_or(false)
    }

    /// Primary approver ids across all stages, in stage order.
    pub fn primary_approver_ids(&self) -> Vec<String> {
        self.collect_approver_ids(|stage| &stage.primary_approvers)
    }

    /// Escalation approver ids across all stages, in stage order.
    pub fn escalation_approver_ids(&self) -> Vec<String> {
        self.collect_approver_ids(|stage| &stage.escalation_approvers)
    }

    fn collect_approver_ids<F>(&self, select: F) -> Vec<String>
    where
        F: Fn(&ApprovalStage) -> &Vec<Approver>,
    {
        self.request_approval_settings
            .iter()
            .flat_map(|s| s.approval_stages.iter().flatten())
            .flat_map(|stage| select(stage).iter())
            .filter_map(|approver| approver.id.clone())
            .collect()
    }
}

/// A grant of an access package to a principal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackageAssignment {
    pub id: String,
    pub target_id: String,
}

/// Subset of `/directoryObjects/{id}` used for grouping.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryObject {
    #[serde(default)]
    pub display_name: Option<String>,
}
