//! Entra ID authentication.
//!
//! Provides the OAuth2 client-credentials token request and secret wrappers.

pub mod oauth;
pub mod secure;

pub use oauth::{ClientCredentials, OAuth2Client};
pub use secure::SecureString;
