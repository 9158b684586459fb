pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod validation;
pub mod wizard;

use config::Settings;
use services::{AuthClient, LoginService, Notifier, RegistrationService};
use session::SessionContext;
use std::sync::Arc;
use wizard::RegistrationWizard;

/// Shared services wired from configuration
#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<RegistrationService>,
    pub login: Arc<LoginService>,
    pub session: Arc<SessionContext>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(settings: &Settings, notifier: Arc<dyn Notifier>) -> Result<Self, error::ApiError> {
        let auth_client = Arc::new(AuthClient::new(settings.api.clone())?);
        let session = Arc::new(SessionContext::in_memory());

        let registration = Arc::new(RegistrationService::new(
            auth_client.clone(),
            settings.registration.clone(),
            notifier.clone(),
        ));
        let login = Arc::new(LoginService::new(
            auth_client,
            settings.login.mode,
            session.clone(),
            notifier.clone(),
        ));

        Ok(Self {
            registration,
            login,
            session,
            notifier,
        })
    }

    pub fn registration_wizard(&self) -> RegistrationWizard {
        RegistrationWizard::new(self.registration.clone(), self.notifier.clone())
    }
}
