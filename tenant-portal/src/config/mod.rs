use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub registration: RegistrationSettings,
    #[serde(default)]
    pub login: LoginSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiSettings {
    /// Tenant signup endpoint.
    pub signup_url: String,
    /// Login endpoint; its request shape follows `login.mode`.
    pub login_url: String,
    /// Sent as the `User-Agent` header on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct RegistrationSettings {
    /// Placeholder logo attached to every new tenant.
    pub logo_url: String,
    /// Where the verification email sends the user afterwards.
    pub redirect_url: String,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    /// Server emails a one-time sign-in link.
    #[default]
    Passwordless,
    /// Server returns a session token for email + password.
    Credentialed,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LoginSettings {
    #[serde(default)]
    pub mode: LoginMode,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector, e.g. `http://tempo:4317`. Export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_service_name() -> String {
    "tenant-portal".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    service_core::config::load_settings(&configuration_directory(base_path))
}

// Works both from the workspace root and from inside the crate directory.
fn configuration_directory(base_path: PathBuf) -> PathBuf {
    if base_path.ends_with("tenant-portal") {
        base_path.join("config")
    } else {
        base_path.join("tenant-portal").join("config")
    }
}
