pub mod login;
pub mod registration;
pub mod sector;

pub use login::{LoginForm, LoginOutcome, LoginRequest, SessionGrant};
pub use registration::{
    ContactPerson, OrganizationDetails, Password, RegistrationInput, SectorRef, SignupPayload,
    TENANT_REALM,
};
pub use sector::Sector;
