//! HTTP client for the backend JSON API with a fixed base URL and timeout.
//! Every request reads the credential store right before dispatch and, when a
//! token is present, sends it as `Authorization: Bearer <token>`. Backend
//! errors are surfaced verbatim and never retried; reacting to 401/403 is the
//! caller's job.

use crate::{config::AppConfig, errors::AppError, features::auth::store::CredentialStore};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument, warn};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared request client. Cloning is cheap and reuses the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
            store,
        })
    }

    /// Fetches JSON from `path`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let response = self.send(self.http.get(&url)).await?;
        handle_json_response(response, self.timeout).await
    }

    /// Posts a JSON body and parses a JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        let builder = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        let response = self.send(builder).await?;
        handle_json_response(response, self.timeout).await
    }

    /// Attaches the current credential and dispatches the request.
    #[instrument(skip_all)]
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let builder = match self.store.get()? {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        };
        let request = builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        self.http
            .execute(request)
            .await
            .map_err(|err| map_request_error(&err, self.timeout))
    }
}

/// Builds a URL from an explicit base URL and the provided path.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: &reqwest::Error, timeout: Duration) -> AppError {
    if err.is_timeout() {
        warn!("request timed out after {} ms", timeout.as_millis());
        AppError::Timeout(format!(
            "Request exceeded {} ms and was aborted.",
            timeout.as_millis()
        ))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
    timeout: Duration,
) -> Result<T, AppError> {
    let response = check_status(response, timeout).await?;
    // The client timeout also covers reading the body.
    let body = response
        .bytes()
        .await
        .map_err(|err| map_request_error(&err, timeout))?;
    serde_json::from_slice(&body)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Passes successful responses through and turns the rest into errors.
async fn check_status(response: Response, timeout: Duration) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .map_err(|err| map_request_error(&err, timeout))?;
    let message = if body.trim().is_empty() {
        "Request failed.".to_string()
    } else {
        body
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(AppError::AuthRejected {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}
