//! Registration form schema.
//!
//! Every rule runs on every pass so the caller gets the complete set of
//! violations at once. Rules can be restricted to a subset of fields, which is
//! how the wizard validates one stage at a time on a partially filled form.

mod errors;
mod password;

pub use errors::{FieldError, FieldErrors};
pub use password::{password_violations, MIN_PASSWORD_LENGTH};

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use validator::{ValidateEmail, ValidateLength, ValidationError};

use crate::models::{RegistrationInput, TENANT_REALM};

/// E.164: leading `+`, a non-zero first digit, at most 15 digits in total.
/// ASCII digits only; `\d` in `regex` also matches other Unicode digits.
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$").expect("phone number pattern is valid"));

const MIN_NAME_LENGTH: u64 = 2;

pub const COMPANY_NAME_TOO_SHORT: &str = "Company name must be at least 2 characters";
pub const NO_SECTOR_SELECTED: &str = "Please select at least one industry sector";
pub const EMPTY_SECTOR_ID: &str = "Sector identifier must not be empty";
pub const NO_CONTACT_PERSON: &str = "At least one contact person is required";
pub const FULL_NAME_TOO_SHORT: &str = "Full name must be at least 2 characters";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str =
    "Please enter a valid phone number with country code (e.g. +1234567890)";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const TERMS_NOT_ACCEPTED: &str = "You must agree to the terms and conditions";
pub const RECAPTCHA_MISSING: &str = "Please complete the reCAPTCHA verification";
pub const INVALID_REALM: &str = "Realm must be TENANT";

/// Individually checkable parts of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    CompanyName,
    IndustrySectors,
    ContactPersons,
    ContactFullName,
    ContactEmailAddress,
    ContactMobilePhone,
    Password,
    RecaptchaToken,
    Realm,
    PasswordConfirm,
    AgreeToTerms,
}

impl RegistrationField {
    /// Every field, in the order the rules run. Cross-field rules come last.
    pub const ALL: &'static [RegistrationField] = &[
        RegistrationField::CompanyName,
        RegistrationField::IndustrySectors,
        RegistrationField::ContactPersons,
        RegistrationField::ContactFullName,
        RegistrationField::ContactEmailAddress,
        RegistrationField::ContactMobilePhone,
        RegistrationField::Password,
        RegistrationField::RecaptchaToken,
        RegistrationField::Realm,
        RegistrationField::PasswordConfirm,
        RegistrationField::AgreeToTerms,
    ];

    /// Fields collected on the organization stage of the wizard.
    pub const ORGANIZATION: &'static [RegistrationField] = &[
        RegistrationField::CompanyName,
        RegistrationField::IndustrySectors,
        RegistrationField::ContactPersons,
        RegistrationField::ContactFullName,
        RegistrationField::ContactEmailAddress,
        RegistrationField::ContactMobilePhone,
    ];

    /// Fields collected on the account stage of the wizard.
    pub const ACCOUNT: &'static [RegistrationField] = &[
        RegistrationField::Password,
        RegistrationField::RecaptchaToken,
        RegistrationField::PasswordConfirm,
        RegistrationField::AgreeToTerms,
    ];

    /// Wire path of the field, or of its list when the rule applies per entry.
    pub fn path(self) -> &'static str {
        match self {
            RegistrationField::CompanyName => "organizationDetails.companyName",
            RegistrationField::IndustrySectors => "organizationDetails.industrySectors",
            RegistrationField::ContactPersons
            | RegistrationField::ContactFullName
            | RegistrationField::ContactEmailAddress
            | RegistrationField::ContactMobilePhone => "contactPersonsDetails",
            RegistrationField::Password => "password",
            RegistrationField::RecaptchaToken => "recaptchaToken",
            RegistrationField::Realm => "realm",
            RegistrationField::PasswordConfirm => "passwordConfirm",
            RegistrationField::AgreeToTerms => "agreeToTerms",
        }
    }
}

/// Registration input that passed every rule.
///
/// The only way to obtain one is [`validate_registration`], so holding one is
/// proof the form is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration(RegistrationInput);

impl ValidRegistration {
    pub fn input(&self) -> &RegistrationInput {
        &self.0
    }

    pub fn into_inner(self) -> RegistrationInput {
        self.0
    }
}

/// Check the whole form.
///
/// Sectors are a set: repeated ids are collapsed to their first occurrence in
/// the returned value.
pub fn validate_registration(input: &RegistrationInput) -> Result<ValidRegistration, FieldErrors> {
    validate_fields(input, RegistrationField::ALL)?;

    let mut input = input.clone();
    let mut seen = HashSet::new();
    input
        .organization_details
        .industry_sectors
        .retain(|sector| seen.insert(sector.id.clone()));

    Ok(ValidRegistration(input))
}

/// Check only `fields`, ignoring everything else in `input`.
///
/// Rules always run in [`RegistrationField::ALL`] order regardless of the
/// order of `fields`.
pub fn validate_fields(
    input: &RegistrationInput,
    fields: &[RegistrationField],
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in RegistrationField::ALL
        .iter()
        .copied()
        .filter(|field| fields.contains(field))
    {
        check_field(input, field, &mut errors);
    }

    errors.into_result()
}

fn check_field(input: &RegistrationInput, field: RegistrationField, errors: &mut FieldErrors) {
    let contacts = &input.contact_persons_details;

    match field {
        RegistrationField::CompanyName => {
            if !input
                .organization_details
                .company_name
                .validate_length(Some(MIN_NAME_LENGTH), None, None)
            {
                errors.add(field.path(), COMPANY_NAME_TOO_SHORT);
            }
        }
        RegistrationField::IndustrySectors => {
            let sectors = &input.organization_details.industry_sectors;
            if sectors.is_empty() {
                errors.add(field.path(), NO_SECTOR_SELECTED);
            }
            for (i, sector) in sectors.iter().enumerate() {
                if sector.id.is_empty() {
                    errors.add(format!("{}.{}._id", field.path(), i), EMPTY_SECTOR_ID);
                }
            }
        }
        RegistrationField::ContactPersons => {
            if contacts.is_empty() {
                errors.add(field.path(), NO_CONTACT_PERSON);
            }
        }
        RegistrationField::ContactFullName => {
            for (i, contact) in contacts.iter().enumerate() {
                if !contact
                    .full_name
                    .validate_length(Some(MIN_NAME_LENGTH), None, None)
                {
                    errors.add(contact_path(i, "fullName"), FULL_NAME_TOO_SHORT);
                }
            }
        }
        RegistrationField::ContactEmailAddress => {
            for (i, contact) in contacts.iter().enumerate() {
                if !is_valid_email(&contact.email_address) {
                    errors.add(contact_path(i, "emailAddress"), INVALID_EMAIL);
                }
            }
        }
        RegistrationField::ContactMobilePhone => {
            for (i, contact) in contacts.iter().enumerate() {
                if !is_valid_phone_number(&contact.mobile_phone_number) {
                    errors.add(contact_path(i, "mobilePhoneNumber"), INVALID_PHONE);
                }
            }
        }
        RegistrationField::Password => {
            for violation in password_violations(input.password.as_str()) {
                errors.add(field.path(), violation);
            }
        }
        RegistrationField::RecaptchaToken => {
            if input.recaptcha_token.is_empty() {
                errors.add(field.path(), RECAPTCHA_MISSING);
            }
        }
        RegistrationField::Realm => {
            if let Some(realm) = &input.realm {
                if realm != TENANT_REALM {
                    errors.add(field.path(), INVALID_REALM);
                }
            }
        }
        RegistrationField::PasswordConfirm => {
            if input.password_confirm != input.password {
                errors.add(field.path(), PASSWORDS_DO_NOT_MATCH);
            }
        }
        RegistrationField::AgreeToTerms => {
            if !input.agree_to_terms {
                errors.add(field.path(), TERMS_NOT_ACCEPTED);
            }
        }
    }
}

fn contact_path(index: usize, field: &str) -> String {
    format!("contactPersonsDetails.{}.{}", index, field)
}

pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_NUMBER.is_match(phone)
}

/// Email syntax check that also requires a dotted domain (`ada@acme` fails).
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}

/// `validator` custom rule wrapping [`is_valid_email`].
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message(Cow::Borrowed(INVALID_EMAIL)))
    }
}
