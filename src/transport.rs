//! HTTP transport for contact form submissions.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, Url};
use thiserror::Error;

/// Default timeout for HTTP requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A form's field set, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// The form's `action` URL.
    pub action: String,
    /// The form's `method`, uppercased. Defaults to `GET` like HTML forms.
    pub method: String,
    /// `(name, value)` pairs in document order.
    pub fields: Vec<(String, String)>,
}

/// Raw server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub status: u16,
    pub body: String,
}

impl FormResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that prevent a response from being received at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid form action '{0}'")]
    InvalidUrl(String),

    #[error("Invalid form method '{0}'")]
    InvalidMethod(String),
}

/// Sends a form submission and returns the server's response.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<FormResponse, TransportError>;
}

/// [`FormTransport`] backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()?;
        Ok(Self {
            http_client,
            base_url: None,
        })
    }

    /// Resolve relative form actions against `base_url`, the way a browser
    /// resolves them against the page URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, TransportError> {
        let url = Url::parse(base_url).map_err(|_| TransportError::InvalidUrl(base_url.to_string()))?;
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn resolve(&self, action: &str) -> Result<Url, TransportError> {
        let invalid = || TransportError::InvalidUrl(action.to_string());
        match Url::parse(action) {
            Ok(url) => Ok(url),
            Err(_) => match &self.base_url {
                Some(base) => base.join(action).map_err(|_| invalid()),
                None => Err(invalid()),
            },
        }
    }
}

impl FormTransport for HttpTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<FormResponse, TransportError> {
        let method = Method::from_bytes(submission.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(submission.method.clone()))?;
        let url = self.resolve(&submission.action)?;

        log::info!("Submitting contact form: {} {}", method, url);

        let request = self
            .http_client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        let request = if method == Method::GET {
            request.query(&submission.fields)
        } else {
            request.form(&submission.fields)
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("Contact form response: {} ({} bytes)", status, body.len());

        Ok(FormResponse { status, body })
    }
}
