//! Shared fixtures for tenant-portal integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tenant_portal::config::{
    ApiSettings, LoginMode, LoginSettings, RegistrationSettings, Settings, TelemetrySettings,
};
use tenant_portal::models::{ContactPerson, OrganizationDetails, Password, RegistrationInput, SectorRef};
use tenant_portal::services::NotificationQueue;
use tenant_portal::AppState;
use wiremock::MockServer;

pub const SIGNUP_PATH: &str = "/v1/auth/signup";
pub const LOGIN_PATH: &str = "/v1/auth/tenant/firebase";
pub const LOGO_URL: &str = "https://cdn.example.com/tenant_logo_placeholder.png";
pub const REDIRECT_URL: &str = "https://accounts.example.com/auth/sign-in?verify=abc";

/// App wired against a mock auth API.
pub struct TestApp {
    pub server: MockServer,
    pub state: AppState,
    pub notifications: Arc<NotificationQueue>,
}

impl TestApp {
    pub async fn spawn(mode: LoginMode) -> Self {
        let server = MockServer::start().await;
        let notifications = Arc::new(NotificationQueue::new());
        let state = AppState::new(&settings_for(&server, mode), notifications.clone())
            .expect("Failed to build app state");

        Self {
            server,
            state,
            notifications,
        }
    }

    /// JSON bodies of every request the mock server received.
    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.body_json().expect("request body is JSON"))
            .collect()
    }
}

pub fn settings_for(server: &MockServer, mode: LoginMode) -> Settings {
    Settings {
        api: ApiSettings {
            signup_url: format!("{}{}", server.uri(), SIGNUP_PATH),
            login_url: format!("{}{}", server.uri(), LOGIN_PATH),
            user_agent: "Mozilla/5.0".to_string(),
        },
        registration: RegistrationSettings {
            logo_url: LOGO_URL.to_string(),
            redirect_url: REDIRECT_URL.to_string(),
        },
        login: LoginSettings { mode },
        telemetry: TelemetrySettings::default(),
    }
}

pub fn valid_registration_input() -> RegistrationInput {
    RegistrationInput {
        organization_details: OrganizationDetails {
            company_name: "Acme Logistics".to_string(),
            industry_sectors: vec![
                SectorRef::new("654c976bf1d5c28fae7b6c35"),
                SectorRef::new("654c976bf1d5c28fae7b6c30"),
            ],
        },
        contact_persons_details: vec![ContactPerson {
            full_name: "Ada Lovelace".to_string(),
            email_address: "ada@acme.io".to_string(),
            mobile_phone_number: "+14155552671".to_string(),
        }],
        password: Password::new("Passw0rd!"),
        password_confirm: Password::new("Passw0rd!"),
        agree_to_terms: true,
        recaptcha_token: "03AFcWeA-token".to_string(),
        ..RegistrationInput::default()
    }
}
