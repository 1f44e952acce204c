//! Per-run export context.
//!
//! Everything the pipeline, emitters and import runner need is passed in
//! here; nothing depends on the process working directory.

use std::path::{Path, PathBuf};

use crate::auth::ClientCredentials;

/// Optional outputs and actions of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Also write one `<group>.tfvars` per resolved assignee name.
    pub grouped_tfvars: bool,
    /// Write `main.tf` and `variables.tf` if they don't exist yet.
    pub generate_main: bool,
    /// Run `terraform_import.sh` after writing it.
    pub run_imports: bool,
}

#[derive(Debug, Clone)]
pub struct ExportContext {
    pub credentials: ClientCredentials,
    pub catalog_id: String,
    pub out_dir: PathBuf,
    pub options: ExportOptions,
}

impl ExportContext {
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
