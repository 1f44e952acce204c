//! `terraform_import.sh` generation.

use std::path::Path;

use super::write_file;
use crate::error::EmitError;

const SHEBANG: &str = "#!/bin/bash";

pub fn render_import_script(commands: &[String]) -> String {
    let mut script = format!("{}\n\n", SHEBANG);
    for cmd in commands {
        script.push_str(cmd);
        script.push('\n');
    }
    script
}

/// Write the script and mark it executable.
pub fn write_import_script(path: &Path, commands: &[String]) -> Result<(), EmitError> {
    write_file(path, &render_import_script(commands))?;

    #[cfg(unix)]
    {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| super::write_error(path, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_order() {
        let commands = vec![
            "terraform import azuread_access_package.b id-2".to_string(),
            "terraform import azuread_access_package.a id-1".to_string(),
        ];
        assert_eq!(
            render_import_script(&commands),
            "#!/bin/bash\n\nterraform import azuread_access_package.b id-2\nterraform import azuread_access_package.a id-1\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_import_script(&[]), "#!/bin/bash\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("terraform_import.sh");
        write_import_script(&path, &[]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
