use std::time::Duration;

use eshop_domain::EshopError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::api::ApiError;
use crate::errors::InfraError;

/// HTTP client core: bounded timeout, single attempt.
///
/// Never retries on its own; the only replay in the stack is the auth
/// interceptor's one-shot replay after a token refresh.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `EshopError::Config` if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, EshopError> {
        Self::builder().build()
    }

    /// Per-request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder exactly once.
    ///
    /// Any HTTP status counts as a response; only transport failures are
    /// errors.
    ///
    /// # Errors
    /// `ApiError::Timeout` when the deadline passes, `ApiError::Network`
    /// when no response arrives, `ApiError::Validation` when the request
    /// cannot be built.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request =
            builder.build().map_err(|err| ApiError::Validation(format!("invalid request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(self.transport_error(&err))
            }
        }
    }

    /// Read a response body to the end under the same deadline.
    ///
    /// # Errors
    /// Same transport classification as [`HttpClient::send`].
    pub async fn read_body(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        response.bytes().await.map(|bytes| bytes.to_vec()).map_err(|err| self.transport_error(&err))
    }

    fn transport_error(&self, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    system_proxy: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            default_headers: None,
            system_proxy: true,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Ignore `HTTP_PROXY` / `HTTPS_PROXY` and connect directly.
    pub fn no_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }

    /// # Errors
    /// Returns `EshopError::Config` if reqwest rejects the settings.
    pub fn build(self) -> Result<HttpClient, EshopError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if !self.system_proxy {
            builder = builder.no_proxy();
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            EshopError::from(infra)
        })?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
