use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use super::auth_client::AuthClient;
use super::notifier::Notifier;
use crate::config::RegistrationSettings;
use crate::error::ApiError;
use crate::models::{SignupPayload, TENANT_REALM};
use crate::validation::ValidRegistration;

pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// Sends a completed registration to the signup endpoint.
#[async_trait]
pub trait RegistrationSubmitter: Send + Sync {
    /// Submit once and return the server's body unchanged.
    ///
    /// Failures are already notified when this returns; the error is handed
    /// back only so the caller can reset its own state.
    async fn submit_registration(&self, registration: &ValidRegistration)
        -> Result<Value, ApiError>;
}

pub struct RegistrationService {
    client: Arc<AuthClient>,
    settings: RegistrationSettings,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationService {
    pub fn new(
        client: Arc<AuthClient>,
        settings: RegistrationSettings,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            settings,
            notifier,
        }
    }

    pub fn payload<'a>(&'a self, registration: &'a ValidRegistration) -> SignupPayload<'a> {
        let input = registration.input();
        SignupPayload {
            organization_details: &input.organization_details,
            contact_persons_details: &input.contact_persons_details,
            realm: TENANT_REALM,
            logo_url: &self.settings.logo_url,
            redirect_url: &self.settings.redirect_url,
            password: &input.password,
            recaptcha_token: &input.recaptcha_token,
        }
    }
}

#[async_trait]
impl RegistrationSubmitter for RegistrationService {
    #[instrument(
        skip_all,
        fields(company = %registration.input().organization_details.company_name)
    )]
    async fn submit_registration(
        &self,
        registration: &ValidRegistration,
    ) -> Result<Value, ApiError> {
        let payload = self.payload(registration);

        match self
            .client
            .post_json(self.client.signup_url(), &payload, REGISTRATION_FAILED_MESSAGE)
            .await
        {
            Ok(body) => {
                tracing::info!("Tenant registration accepted");
                Ok(body)
            }
            Err(e) => {
                tracing::error!(error = %e, status = ?e.status(), "Tenant registration failed");
                self.notifier.error(&e.user_message());
                Err(e)
            }
        }
    }
}
