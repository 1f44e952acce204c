//! Writers for the generated Terraform files.

pub mod import_script;
pub mod scaffold;
pub mod tfvars;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::context::ExportContext;
use crate::error::EmitError;
use crate::export::ExportBundle;

/// Variables file for the whole catalog.
pub const TFVARS_FILE: &str = "terraform.tfvars";

/// Generated import script.
pub const IMPORT_SCRIPT_FILE: &str = "terraform_import.sh";

/// Files written and files left alone by one run.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
    /// Scaffolds that already existed.
    pub skipped: Vec<PathBuf>,
}

/// Write every output the context asks for into its output directory.
pub fn write_all(ctx: &ExportContext, bundle: &ExportBundle) -> Result<EmitReport, EmitError> {
    let out_dir = ctx.out_dir();
    fs::create_dir_all(out_dir).map_err(|e| write_error(out_dir, e))?;

    let mut report = EmitReport::default();

    let tfvars_path = out_dir.join(TFVARS_FILE);
    write_file(&tfvars_path, &tfvars::render_tfvars(bundle)?)?;
    report.written.push(tfvars_path);

    if ctx.options.grouped_tfvars {
        for (group, assignments) in &bundle.grouped_assignments {
            let path = out_dir.join(tfvars::group_file_name(group));
            write_file(&path, &tfvars::render_group_tfvars(assignments)?)?;
            report.written.push(path);
        }
    }

    let script_path = out_dir.join(IMPORT_SCRIPT_FILE);
    import_script::write_import_script(&script_path, &bundle.import_commands)?;
    report.written.push(script_path);

    if ctx.options.generate_main {
        for (name, template) in scaffold::SCAFFOLDS {
            let path = out_dir.join(name);
            if scaffold::write_if_absent(&path, template)? {
                report.written.push(path);
            } else {
                info!("{} already exists, leaving it untouched", path.display());
                report.skipped.push(path);
            }
        }
    }

    Ok(report)
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    fs::write(path, contents).map_err(|e| write_error(path, e))?;
    info!("Wrote {}", path.display());
    Ok(())
}

pub(crate) fn write_error(path: &Path, source: std::io::Error) -> EmitError {
    EmitError::Write {
        path: path.display().to_string(),
        source,
    }
}
