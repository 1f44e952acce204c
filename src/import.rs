//! Running the generated imports through Terraform.

use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::{info, warn};

use crate::config::TerraformConfig;
use crate::emit::IMPORT_SCRIPT_FILE;
use crate::error::ImportError;

/// Whether the output directory configures a Terraform state backend.
///
/// True when `backend.tf` exists, or `main.tf` exists and mentions `backend`.
pub fn backend_configured(out_dir: &Path) -> bool {
    if out_dir.join("backend.tf").exists() {
        return true;
    }

    fs::read_to_string(out_dir.join("main.tf"))
        .map(|content| content.contains("backend"))
        .unwrap_or(false)
}

/// Run `terraform init` when a backend is configured, then the import script.
///
/// A failing init is an error. The import script's exit status is returned
/// for reporting only; individual imports commonly fail for resources that
/// are already in state.
pub fn run_imports(out_dir: &Path, terraform: &TerraformConfig) -> Result<ExitStatus, ImportError> {
    if backend_configured(out_dir) {
        println!("Detected Terraform backend config. Running terraform init...");
        let status = Command::new(&terraform.binary)
            .arg("init")
            .current_dir(out_dir)
            .status()
            .map_err(|e| ImportError::Spawn(terraform.binary.clone(), e))?;

        if !status.success() {
            return Err(ImportError::InitFailed(status.to_string()));
        }
        info!("terraform init completed");
    }

    let status = Command::new(&terraform.shell)
        .arg(IMPORT_SCRIPT_FILE)
        .current_dir(out_dir)
        .status()
        .map_err(|e| ImportError::Spawn(terraform.shell.clone(), e))?;

    if status.success() {
        info!("{} finished", IMPORT_SCRIPT_FILE);
    } else {
        warn!("{} finished with {}", IMPORT_SCRIPT_FILE, status);
    }

    Ok(status)
}
