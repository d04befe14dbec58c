//! Authenticated HTTP transport.
//!
//! [`Transport`] turns a method, a path and an optional body into one
//! authenticated request, hands it to an [`HttpExecutor`], and returns the raw
//! response body. It holds no state between calls.

use crate::error::BoxError;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response, StatusCode, Url};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Executes one HTTP request and returns the response.
///
/// [`reqwest::Client`] implements this trait and is the default. Provide your
/// own implementation to route requests through custom middleware or to
/// script responses in tests.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Send `request` and return whatever the server answered.
    async fn execute(&self, request: Request) -> std::result::Result<Response, BoxError>;
}

#[async_trait]
impl HttpExecutor for reqwest::Client {
    async fn execute(&self, request: Request) -> std::result::Result<Response, BoxError> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(Into::into)
    }
}

/// Sends authenticated requests to the Slack Web API.
#[derive(Clone)]
pub(crate) struct Transport {
    token: String,
    base_url: String,
    executor: Arc<dyn HttpExecutor>,
    timeout: Option<Duration>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(
        token: String,
        base_url: String,
        executor: Arc<dyn HttpExecutor>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            token,
            base_url,
            executor,
            timeout,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request to `base_url + "/" + path` and return the full body.
    ///
    /// Fails with [`Error::MissingCredentials`] before touching the network
    /// when the token is empty. Any status other than `200 OK` becomes
    /// [`Error::UnexpectedStatus`] and the body is left unread.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        if self.token.is_empty() {
            return Err(Error::MissingCredentials);
        }

        let request = self.request(method, path, body)?;
        tracing::debug!(method = %request.method(), path, "sending slack request");

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(request))
                .await
                .map_err(|elapsed| Error::Network(Box::new(elapsed)))?,
            None => self.round_trip(request).await,
        }
    }

    fn request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Request> {
        let url = Url::parse(&format!("{}/{}", self.base_url, path))?;
        let mut request = Request::new(method, url);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))?;
        bearer.set_sensitive(true);

        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        Ok(request)
    }

    async fn round_trip(&self, request: Request) -> Result<Vec<u8>> {
        let response = self
            .executor
            .execute(request)
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "slack responded");

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "unexpected slack status");
            return Err(Error::UnexpectedStatus { status });
        }

        let body = response.bytes().await.map_err(Error::BodyRead)?;
        Ok(body.to_vec())
    }
}
