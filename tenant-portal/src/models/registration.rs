use serde::{Deserialize, Serialize};
use std::fmt;

/// Realm discriminator sent with every tenant signup.
pub const TENANT_REALM: &str = "TENANT";

/// Newtype for passwords to prevent accidental logging.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reference to an industry sector, serialized the way the signup API expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRef {
    #[serde(rename = "_id")]
    pub id: String,
}

impl SectorRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationDetails {
    pub company_name: String,
    pub industry_sectors: Vec<SectorRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactPerson {
    pub full_name: String,
    pub email_address: String,
    /// E.164 formatted, e.g. `+14155552671`.
    pub mobile_phone_number: String,
}

/// Registration form state as entered by the user.
///
/// Every field has a default so partially filled forms deserialize and can be
/// validated stage by stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationInput {
    pub organization_details: OrganizationDetails,
    pub contact_persons_details: Vec<ContactPerson>,
    pub password: Password,
    pub password_confirm: Password,
    pub agree_to_terms: bool,
    pub recaptcha_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

impl Default for RegistrationInput {
    /// An empty form with a single blank contact entry.
    fn default() -> Self {
        Self {
            organization_details: OrganizationDetails::default(),
            contact_persons_details: vec![ContactPerson::default()],
            password: Password::default(),
            password_confirm: Password::default(),
            agree_to_terms: false,
            recaptcha_token: String::new(),
            logo_url: None,
            redirect_url: None,
            realm: None,
        }
    }
}

impl RegistrationInput {
    /// The contact entry edited by the form, created if the list is empty.
    pub fn primary_contact_mut(&mut self) -> &mut ContactPerson {
        if self.contact_persons_details.is_empty() {
            self.contact_persons_details.push(ContactPerson::default());
        }
        &mut self.contact_persons_details[0]
    }

    pub fn has_sector(&self, sector_id: &str) -> bool {
        self.organization_details
            .industry_sectors
            .iter()
            .any(|sector| sector.id == sector_id)
    }
}

/// Body of the signup request.
///
/// Built only from validated input; the confirmation password and the terms
/// checkbox are never part of it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload<'a> {
    pub organization_details: &'a OrganizationDetails,
    pub contact_persons_details: &'a [ContactPerson],
    pub realm: &'a str,
    pub logo_url: &'a str,
    pub redirect_url: &'a str,
    pub password: &'a Password,
    pub recaptcha_token: &'a str,
}
