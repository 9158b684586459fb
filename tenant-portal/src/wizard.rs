//! Two-stage tenant registration flow.
//!
//! `Organization` collects the company and its contact person, `Account`
//! collects credentials and consent. Moving forward validates only the current
//! stage; moving back never validates. Submitting validates everything.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{RegistrationInput, SectorRef};
use crate::services::{Notifier, RegistrationSubmitter};
use crate::validation::{self, FieldErrors, RegistrationField};

pub const REGISTRATION_SUCCESS_MESSAGE: &str =
    "Registration successful! Please check your email for verification.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Organization,
    Account,
    /// The signup was accepted; the wizard is finished.
    Submitted,
}

impl WizardStep {
    /// Stages the user moves through, in order.
    pub const STAGES: [WizardStep; 2] = [WizardStep::Organization, WizardStep::Account];

    /// Fields that must be valid before leaving this step.
    pub fn fields(self) -> &'static [RegistrationField] {
        match self {
            WizardStep::Organization => RegistrationField::ORGANIZATION,
            WizardStep::Account => RegistrationField::ACCOUNT,
            WizardStep::Submitted => &[],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Organization => "Organization Details",
            WizardStep::Account => "Account Setup",
            WizardStep::Submitted => "Registration Successful",
        }
    }

    /// 1-based position within [`Self::STAGES`]; `Submitted` counts as the last.
    pub fn position(self) -> usize {
        match self {
            WizardStep::Organization => 1,
            WizardStep::Account | WizardStep::Submitted => Self::STAGES.len(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Validation error: {0}")]
    Invalid(FieldErrors),

    #[error("Cannot {action} from the {step:?} step")]
    WrongStep {
        action: &'static str,
        step: WizardStep,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WizardError {
    /// Field errors to display next to the form, if this was a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            WizardError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    /// Whether the submitter already surfaced this failure to the user.
    pub fn is_notified(&self) -> bool {
        matches!(self, WizardError::Api(_))
    }
}

pub struct RegistrationWizard {
    step: WizardStep,
    input: RegistrationInput,
    submitter: Arc<dyn RegistrationSubmitter>,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationWizard {
    pub fn new(submitter: Arc<dyn RegistrationSubmitter>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_input(RegistrationInput::default(), submitter, notifier)
    }

    /// Start from a pre-filled form, e.g. one restored after a failed attempt.
    pub fn with_input(
        input: RegistrationInput,
        submitter: Arc<dyn RegistrationSubmitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            step: WizardStep::Organization,
            input,
            submitter,
            notifier,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Percentage shown by the progress bar.
    pub fn progress(&self) -> u8 {
        (self.step.position() * 100 / WizardStep::STAGES.len()) as u8
    }

    pub fn input(&self) -> &RegistrationInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut RegistrationInput {
        &mut self.input
    }

    /// Select `sector_id`, or deselect it if already selected.
    ///
    /// Returns whether the sector is selected afterwards.
    pub fn toggle_sector(&mut self, sector_id: &str) -> bool {
        let sectors = &mut self.input.organization_details.industry_sectors;
        if let Some(index) = sectors.iter().position(|s| s.id == sector_id) {
            sectors.remove(index);
            false
        } else {
            sectors.push(SectorRef::new(sector_id));
            true
        }
    }

    /// Challenge widget callback. Expired challenges report `None` and leave
    /// the previous token in place.
    pub fn set_recaptcha_token(&mut self, token: Option<&str>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.input.recaptcha_token = token.to_string();
        }
    }

    /// Validate the organization stage and move to the account stage.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.step != WizardStep::Organization {
            return Err(WizardError::WrongStep {
                action: "advance",
                step: self.step,
            });
        }

        validation::validate_fields(&self.input, self.step.fields()).map_err(|errors| {
            tracing::debug!(errors = %errors, "Organization step incomplete");
            WizardError::Invalid(errors)
        })?;

        self.step = WizardStep::Account;
        Ok(self.step)
    }

    /// Return to the organization stage without validating anything.
    pub fn back(&mut self) -> WizardStep {
        if self.step == WizardStep::Account {
            self.step = WizardStep::Organization;
        }
        self.step
    }

    /// Validate the whole form and send it.
    ///
    /// On failure the wizard stays on the account stage with the input intact
    /// so the user can retry. Server errors were already notified by the
    /// submitter and are not reported again here.
    pub async fn submit(&mut self) -> Result<Value, WizardError> {
        if self.step != WizardStep::Account {
            return Err(WizardError::WrongStep {
                action: "submit",
                step: self.step,
            });
        }

        let registration =
            validation::validate_registration(&self.input).map_err(WizardError::Invalid)?;

        let body = self.submitter.submit_registration(&registration).await?;

        self.step = WizardStep::Submitted;
        self.notifier.success(REGISTRATION_SUCCESS_MESSAGE);
        tracing::info!(
            company = %self.input.organization_details.company_name,
            "Registration wizard completed"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactPerson, Password};
    use crate::services::{NotificationLevel, NotificationQueue};
    use crate::validation::ValidRegistration;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// Records submissions and answers with a canned result.
    struct StubSubmitter {
        reject_with: Option<String>,
        calls: Mutex<Vec<RegistrationInput>>,
    }

    impl StubSubmitter {
        fn accepting() -> Self {
            Self {
                reject_with: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                reject_with: Some(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RegistrationSubmitter for StubSubmitter {
        async fn submit_registration(
            &self,
            registration: &ValidRegistration,
        ) -> Result<Value, ApiError> {
            self.calls.lock().unwrap().push(registration.input().clone());
            match &self.reject_with {
                Some(message) => Err(ApiError::Rejected {
                    status: StatusCode::BAD_REQUEST,
                    message: message.clone(),
                }),
                None => Ok(serde_json::json!({ "id": "abc" })),
            }
        }
    }

    fn wizard_with(submitter: Arc<StubSubmitter>) -> (RegistrationWizard, Arc<NotificationQueue>) {
        let notifier = Arc::new(NotificationQueue::new());
        (RegistrationWizard::new(submitter, notifier.clone()), notifier)
    }

    fn fill_organization(wizard: &mut RegistrationWizard) {
        wizard.input_mut().organization_details.company_name = "Acme Logistics".to_string();
        wizard.toggle_sector("654c976bf1d5c28fae7b6c35");
        *wizard.input_mut().primary_contact_mut() = ContactPerson {
            full_name: "Ada Lovelace".to_string(),
            email_address: "ada@acme.io".to_string(),
            mobile_phone_number: "+14155552671".to_string(),
        };
    }

    fn fill_account(wizard: &mut RegistrationWizard) {
        let input = wizard.input_mut();
        input.password = Password::new("Passw0rd!");
        input.password_confirm = Password::new("Passw0rd!");
        input.agree_to_terms = true;
        wizard.set_recaptcha_token(Some("03AFcWeA-token"));
    }

    #[test]
    fn test_starts_on_organization_at_half_progress() {
        let (wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        assert_eq!(wizard.step(), WizardStep::Organization);
        assert_eq!(wizard.progress(), 50);
    }

    #[test]
    fn test_advance_rejects_empty_company_name() {
        let (mut wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        fill_organization(&mut wizard);
        wizard.input_mut().organization_details.company_name.clear();

        let err = wizard.advance().unwrap_err();
        let errors = err.field_errors().expect("validation error");
        assert_eq!(
            errors.messages("organizationDetails.companyName"),
            vec!["Company name must be at least 2 characters"]
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(wizard.step(), WizardStep::Organization);
        assert_eq!(wizard.progress(), 50);
    }

    #[test]
    fn test_advance_ignores_account_fields() {
        let (mut wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        fill_organization(&mut wizard);

        assert_eq!(wizard.advance().unwrap(), WizardStep::Account);
        assert_eq!(wizard.progress(), 100);
    }

    #[test]
    fn test_back_is_unconditional() {
        let (mut wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        fill_organization(&mut wizard);
        wizard.advance().unwrap();

        wizard.input_mut().organization_details.company_name.clear();
        assert_eq!(wizard.back(), WizardStep::Organization);
        assert_eq!(wizard.back(), WizardStep::Organization);
    }

    #[test]
    fn test_toggle_sector_twice_deselects() {
        let (mut wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        assert!(wizard.toggle_sector("654c976bf1d5c28fae7b6c30"));
        assert!(wizard.input().has_sector("654c976bf1d5c28fae7b6c30"));
        assert!(!wizard.toggle_sector("654c976bf1d5c28fae7b6c30"));
        assert!(wizard.input().organization_details.industry_sectors.is_empty());
    }

    #[test]
    fn test_expired_recaptcha_keeps_previous_token() {
        let (mut wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        wizard.set_recaptcha_token(Some("first"));
        wizard.set_recaptcha_token(None);
        wizard.set_recaptcha_token(Some(""));
        assert_eq!(wizard.input().recaptcha_token, "first");
    }

    #[tokio::test]
    async fn test_submit_from_organization_is_refused() {
        let submitter = Arc::new(StubSubmitter::accepting());
        let (mut wizard, _) = wizard_with(submitter.clone());

        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, WizardError::WrongStep { .. }));
        assert_eq!(submitter.call_count(), 0);
    }

    #[test]
    fn test_validation_failures_are_not_notified() {
        let (mut wizard, _) = wizard_with(Arc::new(StubSubmitter::accepting()));
        let err = wizard.advance().unwrap_err();
        assert!(err.field_errors().is_some());
        assert!(!err.is_notified());
    }

    #[tokio::test]
    async fn test_submit_validates_everything_before_sending() {
        let submitter = Arc::new(StubSubmitter::accepting());
        let (mut wizard, notifier) = wizard_with(submitter.clone());
        fill_organization(&mut wizard);
        wizard.advance().unwrap();
        fill_account(&mut wizard);
        wizard.input_mut().password_confirm = Password::new("Passw0rd?");

        let err = wizard.submit().await.unwrap_err();
        assert!(err.field_errors().unwrap().contains("passwordConfirm"));
        assert_eq!(submitter.call_count(), 0);
        assert_eq!(wizard.step(), WizardStep::Account);
        assert!(notifier.drain().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_finishes_wizard() {
        let submitter = Arc::new(StubSubmitter::accepting());
        let (mut wizard, notifier) = wizard_with(submitter.clone());
        fill_organization(&mut wizard);
        wizard.advance().unwrap();
        fill_account(&mut wizard);

        let body = wizard.submit().await.unwrap();

        assert_eq!(body, serde_json::json!({ "id": "abc" }));
        assert_eq!(wizard.step(), WizardStep::Submitted);
        assert_eq!(submitter.call_count(), 1);
        let shown = notifier.drain();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, NotificationLevel::Success);
        assert_eq!(shown[0].message, REGISTRATION_SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_submit_stays_on_account_for_retry() {
        let submitter = Arc::new(StubSubmitter::rejecting("Email already registered"));
        let (mut wizard, notifier) = wizard_with(submitter.clone());
        fill_organization(&mut wizard);
        wizard.advance().unwrap();
        fill_account(&mut wizard);

        let err = wizard.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
        assert!(err.is_notified());
        assert_eq!(wizard.step(), WizardStep::Account);
        assert_eq!(wizard.input().password, Password::new("Passw0rd!"));
        // The submitter owns failure notifications.
        assert!(notifier.drain().is_empty());

        let _ = wizard.submit().await;
        assert_eq!(submitter.call_count(), 2);
    }
}
