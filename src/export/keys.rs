//! Terraform map keys derived from Graph display names.

/// Number of target id characters used in assignment keys.
const TARGET_ID_PREFIX_LEN: usize = 6;

/// Turn a display name into a Terraform-friendly key.
///
/// Spaces and hyphens become underscores and the result is lowercased.
/// Applying it twice gives the same result as applying it once.
pub fn sanitize(name: &str) -> String {
    name.replace([' ', '-'], "_").to_lowercase()
}

pub fn package_key(display_name: &str) -> String {
    sanitize(display_name)
}

pub fn policy_key(package_key: &str, policy_display_name: &str) -> String {
    format!("{}_{}", package_key, sanitize(policy_display_name))
}

/// `{package}_user_{first six chars of the target id}`.
pub fn assignment_key(package_key: &str, target_id: &str) -> String {
    let prefix: String = target_id.chars().take(TARGET_ID_PREFIX_LEN).collect();
    format!("{}_user_{}", package_key, prefix)
}
