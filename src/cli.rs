//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::auth::{ClientCredentials, SecureString};
use crate::context::{ExportContext, ExportOptions};

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "entra-tfexport",
    version,
    about = "Export Entra ID access packages, policies and assignments as Terraform variables",
    long_about = "Reads the access packages of one entitlement management catalog from Microsoft Graph \
and writes terraform.tfvars, a terraform_import.sh script and, on request, main.tf/variables.tf scaffolds.

EXAMPLES:
    # Export a catalog into ./iac
    entra-tfexport --client-id <app> --client-secret <secret> --tenant-id <tenant> --catalog-id <catalog>

    # Credentials from the environment, one tfvars file per assignee group
    AZURE_CLIENT_ID=... AZURE_CLIENT_SECRET=... AZURE_TENANT_ID=... \\
        entra-tfexport --catalog-id <catalog> --grouped-tfvars

    # Scaffold and import straight away
    entra-tfexport ... --generate-main --run-imports"
)]
pub struct CliArgs {
    /// Application (client) id of the app registration
    #[arg(long, env = "AZURE_CLIENT_ID")]
    pub client_id: String,

    /// Client secret of the app registration
    #[arg(long, env = "AZURE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Directory (tenant) id
    #[arg(long, env = "AZURE_TENANT_ID")]
    pub tenant_id: String,

    /// Entitlement management catalog to export
    #[arg(long)]
    pub catalog_id: String,

    /// Directory the generated files are written to
    #[arg(long, default_value = "./iac")]
    pub out_dir: PathBuf,

    /// Generate group-based tfvars
    #[arg(long)]
    pub grouped_tfvars: bool,

    /// Create main.tf and variables.tf
    #[arg(long)]
    pub generate_main: bool,

    /// Run the terraform_import.sh script
    #[arg(long)]
    pub run_imports: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Consume the arguments into the context the export runs with.
    pub fn into_context(self) -> ExportContext {
        ExportContext {
            credentials: ClientCredentials {
                client_id: self.client_id,
                client_secret: SecureString::new(self.client_secret),
                tenant_id: self.tenant_id,
            },
            catalog_id: self.catalog_id,
            out_dir: self.out_dir,
            options: ExportOptions {
                grouped_tfvars: self.grouped_tfvars,
                generate_main: self.generate_main,
                run_imports: self.run_imports,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "entra-tfexport",
            "--client-id",
            "app",
            "--client-secret",
            "secret",
            "--tenant-id",
            "tenant",
            "--catalog-id",
            "cat",
            "--grouped-tfvars",
            "--run-imports",
        ])
        .unwrap();

        assert_eq!(args.out_dir, PathBuf::from("./iac"));

        let ctx = args.into_context();
        assert_eq!(ctx.catalog_id, "cat");
        assert_eq!(ctx.credentials.client_secret.as_str(), "secret");
        assert!(ctx.options.grouped_tfvars);
        assert!(!ctx.options.generate_main);
        assert!(ctx.options.run_imports);
    }

    #[test]
    fn test_credentials_from_environment() {
        // Only this test touches the AZURE_* variables; the others pass
        // every credential as a flag, which takes precedence over them.
        std::env::set_var("AZURE_CLIENT_ID", "env-app");
        std::env::set_var("AZURE_CLIENT_SECRET", "env-secret");
        std::env::set_var("AZURE_TENANT_ID", "env-tenant");

        let from_env = CliArgs::try_parse_from(["entra-tfexport", "--catalog-id", "cat"]);
        let overridden = CliArgs::try_parse_from([
            "entra-tfexport",
            "--catalog-id",
            "cat",
            "--tenant-id",
            "flag-tenant",
        ]);

        std::env::remove_var("AZURE_CLIENT_ID");
        std::env::remove_var("AZURE_CLIENT_SECRET");
        std::env::remove_var("AZURE_TENANT_ID");

        let ctx = from_env.unwrap().into_context();
        assert_eq!(ctx.credentials.client_id, "env-app");
        assert_eq!(ctx.credentials.client_secret.as_str(), "env-secret");
        assert_eq!(ctx.credentials.tenant_id, "env-tenant");

        let overridden = overridden.unwrap();
        assert_eq!(overridden.tenant_id, "flag-tenant");
        assert_eq!(overridden.client_id, "env-app");
    }

    #[test]
    fn test_catalog_id_required() {
        let result = CliArgs::try_parse_from([
            "entra-tfexport",
            "--client-id",
            "app",
            "--client-secret",
            "secret",
            "--tenant-id",
            "tenant",
        ]);
        assert!(result.is_err());
    }
}
