//! OAuth2 client-credentials flow for Entra ID.

use crate::auth::secure::SecureString;
use crate::config::Config;
use crate::error::AuthError;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{debug, error, info};

/// Application credentials used for the token request.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecureString,
    pub tenant_id: String,
}

/// OAuth2 client for the Entra ID token endpoint.
pub struct OAuth2Client {
    credentials: ClientCredentials,
    token_url: String,
    scope: String,
    http_client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a new OAuth2 client for the credentials' tenant.
    pub fn new(config: &Config, credentials: ClientCredentials) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.http_connect_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            token_url: config.token_url(&credentials.tenant_id),
            credentials,
            scope: config.oauth.scope.clone(),
            http_client,
        })
    }

    /// Request an app-only access token with the client-credentials grant.
    pub async fn acquire_token(&self) -> Result<SecureString, AuthError> {
        let credentials = &self.credentials;
        let params = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];

        debug!("Requesting token from {}", self.token_url);

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::TokenRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            // Body carries the AADSTS code, useful in logs but not on the terminal
            let error_body = response.text().await.unwrap_or_default();
            error!("Token request failed: HTTP {} - {}", status, error_body);
            return Err(AuthError::TokenRequestFailed(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;

        if token_response.access_token.is_empty() {
            return Err(AuthError::InvalidTokenResponse(
                "empty access_token".to_string(),
            ));
        }

        let expires_at = Utc::now() + Duration::seconds(token_response.expires_in as i64);
        info!(
            "Acquired {} token, expires at {}",
            token_response.token_type, expires_at
        );

        Ok(token_response.access_token)
    }
}

/// Token response from Entra ID.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: SecureString,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: "app-id".into(),
            client_secret: SecureString::from("s3cret"),
            tenant_id: "tenant-1".into(),
        }
    }

    #[tokio::test]
    async fn test_acquire_token_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_secret=s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "eyJ0eXAi"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config("https://graph.invalid/beta", &server.uri());
        let client = OAuth2Client::new(&config, credentials()).unwrap();

        let token = client.acquire_token().await.unwrap();
        assert_eq!(token.as_str(), "eyJ0eXAi");
    }

    #[tokio::test]
    async fn test_acquire_token_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided."
            })))
            .mount(&server)
            .await;

        let config = test_config("https://graph.invalid/beta", &server.uri());
        let client = OAuth2Client::new(&config, credentials()).unwrap();

        let result = client.acquire_token().await;
        match result {
            Err(AuthError::TokenRequestFailed(msg)) => assert_eq!(msg, "HTTP 401"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_acquire_token_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let config = test_config("https://graph.invalid/beta", &server.uri());
        let client = OAuth2Client::new(&config, credentials()).unwrap();

        let result = client.acquire_token().await;
        assert!(matches!(result, Err(AuthError::InvalidTokenResponse(_))));
    }
}
