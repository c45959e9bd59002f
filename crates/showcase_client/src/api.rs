use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use showcase_core::{CatalogEntry, ContactMessage};

use crate::ApiError;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The REST surface the console depends on.
///
/// Implementations translate HTTP statuses into the [`ApiError`] taxonomy:
/// 401 on an authenticated call becomes `SessionExpired`, a 400-class
/// answer to a mutation becomes `Validation`, everything else that is not
/// a success becomes `Network`. Callers own the invalidation cascade.
#[async_trait::async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError>;
    async fn fetch_exclusions(&self, auth: &str) -> Result<Vec<String>, ApiError>;
    async fn add_exclusion(&self, auth: &str, name: &str) -> Result<String, ApiError>;
    async fn remove_exclusion(&self, auth: &str, name: &str) -> Result<String, ApiError>;
    async fn fetch_catalog(&self, include_forks: bool) -> Result<Vec<CatalogEntry>, ApiError>;
    async fn fetch_messages(&self, auth: &str) -> Result<Vec<ContactMessage>, ApiError>;
}

/// `{message}` acknowledgment body.
#[derive(Debug, Default, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: String,
}

/// `{error}` rejection body.
#[derive(Debug, Default, Deserialize)]
struct ServerError {
    #[serde(default)]
    error: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(base_url: Url, settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { base_url, client })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Network("base url cannot carry path segments".into()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl PortfolioApi for ReqwestApi {
    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["login"])?)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => {
                let body: ServerMessage = response.json().await.unwrap_or_default();
                let message = if body.message.is_empty() {
                    "invalid credentials".to_string()
                } else {
                    body.message
                };
                Err(ApiError::Auth(message))
            }
            status => Err(ApiError::Network(format!(
                "login failed with status {status}"
            ))),
        }
    }

    async fn fetch_exclusions(&self, auth: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["blacklist"])?)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .await
                .map_err(|err| ApiError::Network(err.to_string())),
            StatusCode::UNAUTHORIZED => Err(ApiError::SessionExpired),
            status => Err(ApiError::Network(format!(
                "exclusion list fetch failed with status {status}"
            ))),
        }
    }

    async fn add_exclusion(&self, auth: &str, name: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["blacklist"])?)
            .header(AUTHORIZATION, auth)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .map_err(map_transport_error)?;
        acknowledgment(response).await
    }

    async fn remove_exclusion(&self, auth: &str, name: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&["blacklist", name])?)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_transport_error)?;
        acknowledgment(response).await
    }

    async fn fetch_catalog(&self, include_forks: bool) -> Result<Vec<CatalogEntry>, ApiError> {
        let mut url = self.endpoint(&["repos"])?;
        url.query_pairs_mut()
            .append_pair("include_forks", if include_forks { "true" } else { "false" });

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network(format!(
                "catalog fetch failed with status {status}"
            )));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    async fn fetch_messages(&self, auth: &str) -> Result<Vec<ContactMessage>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["contact", "messages"])?)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .await
                .map_err(|err| ApiError::Network(err.to_string())),
            StatusCode::UNAUTHORIZED => Err(ApiError::SessionExpired),
            status => Err(ApiError::Network(format!(
                "message log fetch failed with status {status}"
            ))),
        }
    }
}

/// Maps a mutation response: any 2xx is an acknowledgment (the server
/// answers duplicate adds with an informational 2xx), 401 expires the
/// session, other 4xx carry a `{error}` reason.
async fn acknowledgment(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    if status.is_success() {
        let body: ServerMessage = response.json().await.unwrap_or_default();
        return Ok(body.message);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::SessionExpired);
    }
    if status.is_client_error() {
        let body: ServerError = response.json().await.unwrap_or_default();
        let reason = if body.error.is_empty() {
            format!("the server rejected the change (status {status})")
        } else {
            body.error
        };
        return Err(ApiError::Validation(reason));
    }
    Err(ApiError::Network(format!(
        "mutation failed with status {status}"
    )))
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Network(format!("request timed out: {err}"));
    }
    ApiError::Network(err.to_string())
}
