use serde::{Deserialize, Serialize};
use validator::Validate;

use super::registration::Password;

/// Login form as submitted by the user.
///
/// `password` is only used when the deployment runs the credentialed flow.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "crate::validation::validate_email_address"))]
    pub email: String,

    #[serde(default)]
    pub password: Option<Password>,
}

impl LoginForm {
    pub fn passwordless(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }

    pub fn credentialed(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(Password::new(password)),
        }
    }
}

/// Wire body of a login request; the variant follows the configured login mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    /// Asks the server to email a one-time sign-in link.
    Passwordless { email: String },
    /// Exchanges credentials for a session directly.
    Credentialed {
        #[serde(rename = "emailAddress")]
        email_address: String,
        password: Password,
    },
}

/// Successful credentialed login body.
#[derive(Clone, Deserialize)]
pub struct SessionGrant {
    pub token: String,
    pub user: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The server accepted the request and emailed a sign-in link.
    LinkSent(serde_json::Value),
    /// A session was stored; carries the user profile.
    SessionStarted(serde_json::Value),
}
