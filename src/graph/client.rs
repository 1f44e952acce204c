//! Microsoft Graph client for entitlement management exports.
//!
//! Uses the Graph beta endpoint, which is where the access package
//! assignment and policy shapes used by the export live.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, warn};
use url::Url;

use super::models::{AccessPackage, AccessPackageAssignment, AssignmentPolicy, DirectoryObject};
use crate::auth::SecureString;
use crate::config::Config;
use crate::error::ApiError;

/// Display name used when a directory object has none or no longer exists.
pub const UNKNOWN_GROUP: &str = "UnknownGroup";

/// Entitlement management path segments under the Graph base URL.
const ENTITLEMENT_MANAGEMENT: [&str; 2] = ["identityGovernance", "entitlementManagement"];

/// One OData collection page.
#[derive(Debug, Deserialize)]
struct ODataPage<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// OData error response from Microsoft Graph.
#[derive(Debug, Deserialize)]
struct ODataError {
    error: ODataErrorBody,
}

#[derive(Debug, Deserialize)]
struct ODataErrorBody {
    code: String,
    message: String,
}

/// Result of fetching a single page of a collection.
#[derive(Debug, PartialEq)]
pub enum PageOutcome<T> {
    /// More pages follow at the given URL.
    Next(Vec<T>, String),
    /// This was the final page.
    Last(Vec<T>),
}

/// Microsoft Graph API client bound to one access token.
pub struct GraphClient {
    http_client: Client,
    base_url: String,
    access_token: SecureString,
}

impl GraphClient {
    /// Create a new Graph client.
    pub fn new(config: &Config, access_token: SecureString) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.http_connect_timeout())
            .build()
            .map_err(|e| ApiError::GraphRequestFailed(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.graph_base_url().to_string(),
            access_token,
        })
    }

    /// Build a Graph URL from path segments, with an optional `$filter` expression.
    ///
    /// Segments are percent-encoded individually, so ids containing `/`, `?`
    /// or `#` stay inside their segment.
    fn url(&self, segments: &[&str], filter: Option<&str>) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::GraphRequestFailed(format!("Invalid URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| ApiError::GraphRequestFailed(format!("Invalid URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        if let Some(filter) = filter {
            url.set_query(Some(&format!("$filter={}", encode_query_value(filter))));
        }

        Ok(url.into())
    }

    /// Build a URL under the entitlement management path.
    fn entitlement_url(&self, tail: &[&str], filter: Option<&str>) -> Result<String, ApiError> {
        let segments: Vec<&str> = ENTITLEMENT_MANAGEMENT.iter().chain(tail).copied().collect();
        self.url(&segments, filter)
    }

    async fn send_get(&self, url: &str) -> Result<Response, ApiError> {
        self.http_client
            .get(url)
            .bearer_auth(self.access_token.as_str())
            .send()
            .await
            .map_err(|e| ApiError::GraphRequestFailed(e.to_string()))
    }

    /// Fetch one page of a collection.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<PageOutcome<T>, ApiError> {
        debug!("Fetching page {}", url);

        let response = self.send_get(url).await?;

        if response.status() != StatusCode::OK {
            return Err(error_from_response(response).await);
        }

        let page: ODataPage<T> = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(match page.next_link {
            Some(next) => PageOutcome::Next(page.value, next),
            None => PageOutcome::Last(page.value),
        })
    }

    /// Fetch every page of a collection, following `@odata.nextLink`.
    ///
    /// Items are returned in the order Graph served them. Any failed page
    /// fails the whole call.
    pub async fn get_all<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut url = url.to_string();
        let mut pages = 0usize;

        loop {
            pages += 1;
            match self.get_page(&url).await? {
                PageOutcome::Next(mut page, next) => {
                    items.append(&mut page);
                    url = next;
                }
                PageOutcome::Last(mut page) => {
                    items.append(&mut page);
                    break;
                }
            }
        }

        debug!("Fetched {} items in {} pages", items.len(), pages);
        Ok(items)
    }

    /// Resolve a directory object id to its display name.
    ///
    /// Returns [`UNKNOWN_GROUP`] when the object has no display name, no
    /// longer exists, or cannot be read with the granted permissions.
    /// Server errors and transport failures propagate.
    pub async fn get_display_name(&self, object_id: &str) -> Result<String, ApiError> {
        let url = self.url(&["directoryObjects", object_id], None)?;
        let response = self.send_get(&url).await?;

        match response.status() {
            StatusCode::OK => {
                let object: DirectoryObject = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ParseFailed(e.to_string()))?;
                match object.display_name {
                    Some(name) if !name.trim().is_empty() => Ok(name),
                    _ => {
                        warn!("Directory object {} has no display name", object_id);
                        Ok(UNKNOWN_GROUP.to_string())
                    }
                }
            }
            StatusCode::NOT_FOUND => {
                warn!("Directory object {} not found", object_id);
                Ok(UNKNOWN_GROUP.to_string())
            }
            StatusCode::FORBIDDEN => {
                warn!("Not allowed to read directory object {}", object_id);
                Ok(UNKNOWN_GROUP.to_string())
            }
            _ => Err(error_from_response(response).await),
        }
    }

    /// List access packages in a catalog.
    pub async fn list_access_packages(
        &self,
        catalog_id: &str,
    ) -> Result<Vec<AccessPackage>, ApiError> {
        let url = self.entitlement_url(
            &["accessPackages"],
            Some(&format!("catalogId eq {}", odata_literal(catalog_id))),
        )?;
        self.get_all(&url).await
    }

    /// List assignment policies of an access package.
    pub async fn list_assignment_policies(
        &self,
        access_package_id: &str,
    ) -> Result<Vec<AssignmentPolicy>, ApiError> {
        let url = self.entitlement_url(
            &["accessPackages", access_package_id, "assignmentPolicies"],
            None,
        )?;
        self.get_all(&url).await
    }

    /// List assignments of an access package.
    pub async fn list_assignments(
        &self,
        access_package_id: &str,
    ) -> Result<Vec<AccessPackageAssignment>, ApiError> {
        let url = self.entitlement_url(
            &["accessPackageAssignments"],
            Some(&format!("accessPackageId eq {}", odata_literal(access_package_id))),
        )?;
        self.get_all(&url).await
    }
}

/// Quote a value as an OData string literal, doubling embedded single quotes.
fn odata_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Escape the characters a query string would otherwise treat as delimiters.
/// `Url::set_query` encodes the rest (spaces, quotes).
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '#' => encoded.push_str("%23"),
            '&' => encoded.push_str("%26"),
            '+' => encoded.push_str("%2B"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Map a non-success response to an [`ApiError`].
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    match status.as_u16() {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        429 => ApiError::RateLimited,
        _ => {
            let body = response.text().await.unwrap_or_default();
            error!("Graph request failed: HTTP {} - {}", status, body);
            match serde_json::from_str::<ODataError>(&body) {
                Ok(odata) => ApiError::GraphRequestFailed(format!(
                    "HTTP {}: {} - {}",
                    status.as_u16(),
                    odata.error.code,
                    odata.error.message
                )),
                Err(_) => ApiError::GraphRequestFailed(format!("HTTP {}", status.as_u16())),
            }
        }
    }
}
