//! Error types for the entra-tfexport application.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Output error: {0}")]
    Emit(#[from] EmitError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Token acquisition errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),
}

/// Graph API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Graph API request failed: {0}")]
    GraphRequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseFailed(String),

    #[error("Unauthorized (401): Token may be expired")]
    Unauthorized,

    #[error("Forbidden (403): Insufficient permissions")]
    Forbidden,

    #[error("Rate limited (429): Too many requests")]
    RateLimited,
}

/// Errors while writing generated files.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {0}: {1}")]
    Serialize(&'static str, serde_json::Error),
}

/// Errors from running Terraform.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to start {0}: {1}")]
    Spawn(String, std::io::Error),

    #[error("terraform init exited with {0}")]
    InitFailed(String),
}

impl AppError {
    /// Returns a user-friendly message for display on the terminal.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Auth(AuthError::TokenRequestFailed(_)) => {
                "Sign-in failed. Check the client id, client secret and tenant id."
            }
            Self::Auth(AuthError::InvalidTokenResponse(_)) => {
                "Unexpected response from the identity platform."
            }
            Self::Api(ApiError::Unauthorized) => "Access token was rejected by Graph.",
            Self::Api(ApiError::Forbidden) => {
                "Insufficient permissions. The app needs EntitlementManagement.Read.All."
            }
            Self::Api(ApiError::RateLimited) => "Graph throttled the export. Try again later.",
            Self::Api(_) => "Graph API request failed.",
            Self::Emit(_) => "Failed to write generated files.",
            Self::Import(ImportError::Spawn(_, _)) => "Could not start terraform.",
            Self::Import(ImportError::InitFailed(_)) => "terraform init failed.",
            Self::Config(_) => "Configuration error. Please check settings.",
        }
    }
}
