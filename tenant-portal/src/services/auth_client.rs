use crate::config::ApiSettings;
use crate::error::ApiError;
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for the remote auth API.
///
/// One POST per call, no retries. Error bodies are inspected for a `message`
/// field; anything else collapses to the caller's fallback message.
pub struct AuthClient {
    client: Client,
    settings: ApiSettings,
}

impl AuthClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(&settings.user_agent).build()?;
        Ok(Self { client, settings })
    }

    pub fn signup_url(&self) -> &str {
        &self.settings.signup_url
    }

    pub fn login_url(&self) -> &str {
        &self.settings.login_url
    }

    /// POST `body` as JSON and return the parsed success body unchanged.
    ///
    /// `fallback_message` is used when a failure response carries no message.
    pub async fn post_json<B>(
        &self,
        url: &str,
        body: &B,
        fallback_message: &str,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                ApiError::Transport(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            tracing::debug!(status = %status, url = %url, "Auth API request succeeded");
            parse_success_body(&text)
        } else {
            let message = error_message(&text).unwrap_or_else(|| fallback_message.to_string());
            tracing::warn!(
                status = %status,
                url = %url,
                message = %message,
                "Auth API rejected request"
            );
            Err(ApiError::Rejected { status, message })
        }
    }
}

fn parse_success_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        tracing::error!("Failed to parse auth API response body: {}", e);
        ApiError::UnexpectedResponse(e.to_string())
    })
}

/// `message` from an error body, when it is a non-empty string.
fn error_message(text: &str) -> Option<String> {
    let body: Value = serde_json::from_str(text).ok()?;
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
