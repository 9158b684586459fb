use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::auth_client::AuthClient;
use super::notifier::Notifier;
use crate::config::LoginMode;
use crate::error::{ApiError, LoginError};
use crate::models::{LoginForm, LoginOutcome, LoginRequest, SessionGrant};
use crate::session::SessionContext;
use crate::validation::FieldErrors;

pub const LOGIN_FAILED_MESSAGE: &str = "Login request failed";
pub const LOGIN_LINK_SENT_MESSAGE: &str = "Login email sent! Please check your inbox.";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "Password is required";

/// Requests access for a user, in the flow the deployment is configured for.
pub struct LoginService {
    client: Arc<AuthClient>,
    mode: LoginMode,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
}

impl LoginService {
    pub fn new(
        client: Arc<AuthClient>,
        mode: LoginMode,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            mode,
            session,
            notifier,
        }
    }

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    /// Validate the form and shape it for the configured mode.
    pub fn build_request(&self, form: &LoginForm) -> Result<LoginRequest, FieldErrors> {
        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let request = match self.mode {
            LoginMode::Passwordless => LoginRequest::Passwordless {
                email: form.email.clone(),
            },
            LoginMode::Credentialed => match form.password.as_ref().filter(|p| !p.is_empty()) {
                Some(password) => LoginRequest::Credentialed {
                    email_address: form.email.clone(),
                    password: password.clone(),
                },
                None => {
                    errors.add("password", PASSWORD_REQUIRED_MESSAGE);
                    return Err(errors);
                }
            },
        };

        errors.into_result().map(|()| request)
    }

    /// Perform exactly one login call.
    ///
    /// Server failures are notified here; invalid forms are returned without
    /// touching the network.
    #[instrument(skip_all, fields(mode = ?self.mode))]
    pub async fn request_login(&self, form: &LoginForm) -> Result<LoginOutcome, LoginError> {
        let request = self.build_request(form)?;

        let body = match self
            .client
            .post_json(self.client.login_url(), &request, LOGIN_FAILED_MESSAGE)
            .await
        {
            Ok(body) => body,
            Err(e) => return Err(self.report(e).into()),
        };

        match self.mode {
            LoginMode::Passwordless => {
                tracing::info!("Login link requested");
                self.notifier.success(LOGIN_LINK_SENT_MESSAGE);
                Ok(LoginOutcome::LinkSent(body))
            }
            LoginMode::Credentialed => {
                let user = self.start_session(body).map_err(|e| self.report(e))?;
                tracing::info!("Session started");
                Ok(LoginOutcome::SessionStarted(user))
            }
        }
    }

    fn start_session(&self, body: Value) -> Result<Value, ApiError> {
        let grant: SessionGrant = serde_json::from_value(body)
            .map_err(|e| ApiError::UnexpectedResponse(format!("Invalid login response: {}", e)))?;

        self.session
            .start(&grant.token, &grant.user)
            .map_err(|e| ApiError::UnexpectedResponse(format!("Unstorable user profile: {}", e)))?;
        Ok(grant.user)
    }

    fn report(&self, error: ApiError) -> ApiError {
        tracing::error!(error = %error, status = ?error.status(), "Login request failed");
        self.notifier.error(&error.user_message());
        error
    }
}
