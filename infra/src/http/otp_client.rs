//! Backend OTP endpoints over HTTP
//!
//! All requests are `POST` with JSON bodies and an
//! `Authorization: Bearer <token>` header. Responses are classified into
//! the three failure kinds the flow understands:
//!
//! - no response at all (connect error, timeout) → `ApiFailure::Transport`
//! - non-2xx status → `ApiFailure::Rejected`, carrying the server message
//! - 2xx with an unexpected body → `ApiFailure::Malformed`

use std::time::Duration;

use async_trait::async_trait;
use ep_core::{ApiFailure, OtpApiTrait, OtpDispatch, SessionToken, VerifyResponse};
use ep_shared::ApiConfig;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{DispatchBody, ErrorBody, VerifyBody, VerifyRequest};
use crate::InfrastructureError;

/// `reqwest`-backed implementation of [`OtpApiTrait`]
#[derive(Debug, Clone)]
pub struct HttpOtpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpOtpApi {
    /// Build a client with the configured timeouts and user agent
    pub fn new(config: ApiConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "API base URL must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        debug!(base_url = %config.base_url, "Initialized backend OTP client");

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST to `path` and decode a successful body as `T`
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &SessionToken,
        body: Option<&VerifyRequest<'_>>,
    ) -> Result<T, ApiFailure> {
        let url = self.config.url_for(path);
        let mut request = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Backend request failed before a response");
            ApiFailure::Transport(describe_transport_error(&e))
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            warn!(url = %url, status = status.as_u16(), error = %e, "Failed to read response body");
            ApiFailure::Transport(describe_transport_error(&e))
        })?;

        debug!(url = %url, status = status.as_u16(), "Backend responded");

        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(url = %url, error = %e, "Unexpected response body");
            ApiFailure::Malformed(e.to_string())
        })
    }
}

#[async_trait]
impl OtpApiTrait for HttpOtpApi {
    async fn send_otp(&self, token: &SessionToken) -> Result<OtpDispatch, ApiFailure> {
        let body: DispatchBody = self.post(&self.config.endpoints.send, token, None).await?;
        Ok(body.into_dispatch())
    }

    async fn resend_otp(&self, token: &SessionToken) -> Result<OtpDispatch, ApiFailure> {
        let body: DispatchBody = self.post(&self.config.endpoints.resend, token, None).await?;
        Ok(body.into_dispatch())
    }

    async fn verify_otp(
        &self,
        token: &SessionToken,
        code: &str,
    ) -> Result<VerifyResponse, ApiFailure> {
        let request = VerifyRequest { otp: code };
        let body: VerifyBody = self
            .post(&self.config.endpoints.verify, token, Some(&request))
            .await?;
        Ok(body.into_response())
    }
}

/// Classify a non-2xx response, keeping the server's message when it sent one
fn rejection(status: StatusCode, bytes: &[u8]) -> ApiFailure {
    let message = serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(ErrorBody::into_message);

    ApiFailure::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
