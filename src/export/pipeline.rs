//! Catalog export: packages, then per package its policies and assignments.

use tracing::{debug, info};

use super::keys::{assignment_key, package_key, policy_key, sanitize};
use super::model::{AssignmentVars, ExportBundle, PackageVars, PolicyVars};
use crate::context::ExportOptions;
use crate::error::ApiError;
use crate::graph::GraphClient;

/// Fetch a catalog's entitlement configuration and flatten it.
///
/// Calls are made one after another; each package's policies and
/// assignments are fetched before moving on to the next package. Assignee
/// names are only looked up when grouped output is requested.
pub async fn run_export(
    client: &GraphClient,
    catalog_id: &str,
    options: &ExportOptions,
) -> Result<ExportBundle, ApiError> {
    info!("Fetching access packages for catalog {}", catalog_id);
    let packages = client.list_access_packages(catalog_id).await?;
    info!("Found {} access packages", packages.len());

    let mut bundle = ExportBundle::new();

    for pkg in packages {
        let name = package_key(&pkg.display_name);
        debug!("Exporting access package {} ({})", name, pkg.id);

        bundle.add_package(
            name.clone(),
            PackageVars {
                catalog_id: pkg.catalog_id.clone(),
                description: pkg.description_or_empty(),
            },
            &pkg.id,
        );

        let policies = client.list_assignment_policies(&pkg.id).await?;
        for policy in policies {
            bundle.add_policy(
                policy_key(&name, &policy.display_name),
                PolicyVars {
                    access_package_key: name.clone(),
                    duration_in_days: policy.duration_in_days(),
                    request_approval: policy.request_approval(),
                    approvers_primary: policy.primary_approver_ids(),
                    approvers_secondary: policy.escalation_approver_ids(),
                },
                &policy.id,
            );
        }

        let assignments = client.list_assignments(&pkg.id).await?;
        for assignment in assignments {
            let group = if options.grouped_tfvars {
                Some(sanitize(&client.get_display_name(&assignment.target_id).await?))
            } else {
                None
            };

            bundle.add_assignment(
                assignment_key(&name, &assignment.target_id),
                AssignmentVars {
                    access_package_key: name.clone(),
                    target_id: assignment.target_id,
                },
                &assignment.id,
                group,
            );
        }
    }

    info!(
        "Exported {} packages, {} policies, {} assignments",
        bundle.access_packages.len(),
        bundle.assignment_policies.len(),
        bundle.assignments.len()
    );

    Ok(bundle)
}
