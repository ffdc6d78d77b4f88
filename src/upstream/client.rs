//! Typed CRUD calls against a backend record service.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::registry::ServiceKind;

/// Errors talking to a backend record service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Backend reported the resource does not exist.
    #[error("upstream resource not found")]
    NotFound,

    /// Backend answered with a non-success status other than 404.
    /// The status is preserved so the gateway can pass it through
    /// unreinterpreted (e.g., a validation failure).
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// The call exceeded the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection or protocol failure talking to the backend.
    #[error("upstream transport failure: {0}")]
    Transport(reqwest::Error),

    /// A request URL could not be built from the base address.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// HTTP client for the backend record services.
///
/// One shared connection pool; every call carries the fixed per-request
/// timeout. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client with the given per-call timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http })
    }

    /// `GET {base}/{service}` — fetch the whole collection.
    pub async fn list(&self, base: &Url, kind: ServiceKind) -> Result<Value, UpstreamError> {
        let url = base.join(kind.as_str())?;
        tracing::debug!(service = %kind, url = %url, "Fetching collection");
        let response = check(self.http.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    /// `GET {base}/{service}/{id}` — fetch a single item.
    pub async fn get(&self, base: &Url, kind: ServiceKind, id: i64) -> Result<Value, UpstreamError> {
        let url = base.join(&format!("{kind}/{id}"))?;
        tracing::debug!(service = %kind, id, url = %url, "Fetching item");
        let response = check(self.http.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    /// `POST {base}/{service}` — create an item.
    ///
    /// The created representation is not surfaced; callers redirect to the
    /// listing instead of inspecting it.
    pub async fn create(
        &self,
        base: &Url,
        kind: ServiceKind,
        payload: &Value,
    ) -> Result<(), UpstreamError> {
        let url = base.join(kind.as_str())?;
        tracing::debug!(service = %kind, url = %url, "Creating item");
        check(self.http.post(url).json(payload).send().await?)?;
        Ok(())
    }

    /// `PUT {base}/{service}/{id}` — full-replace update of an item.
    pub async fn update(
        &self,
        base: &Url,
        kind: ServiceKind,
        id: i64,
        payload: &Value,
    ) -> Result<(), UpstreamError> {
        let url = base.join(&format!("{kind}/{id}"))?;
        tracing::debug!(service = %kind, id, url = %url, "Updating item");
        check(self.http.put(url).json(payload).send().await?)?;
        Ok(())
    }

    /// `DELETE {base}/{service}/{id}` — delete an item.
    pub async fn delete(&self, base: &Url, kind: ServiceKind, id: i64) -> Result<(), UpstreamError> {
        let url = base.join(&format!("{kind}/{id}"))?;
        tracing::debug!(service = %kind, id, url = %url, "Deleting item");
        check(self.http.delete(url).send().await?)?;
        Ok(())
    }
}

/// Map a backend status into the error taxonomy.
fn check(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        Err(UpstreamError::NotFound)
    } else if !status.is_success() {
        Err(UpstreamError::Status(status))
    } else {
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_urls_are_built_under_the_base() {
        let base = Url::parse("http://maison-service:8005/").unwrap();
        let url = base.join(&format!("{}/{}", ServiceKind::Maisons, 7)).unwrap();
        assert_eq!(url.as_str(), "http://maison-service:8005/maisons/7");
    }

    #[test]
    fn test_client_construction() {
        assert!(UpstreamClient::new(Duration::from_secs(10)).is_ok());
    }
}
