pub mod auth_client;
pub mod login;
pub mod notifier;
pub mod registration;

pub use auth_client::AuthClient;
pub use login::LoginService;
pub use notifier::{ConsoleNotifier, Notification, NotificationLevel, NotificationQueue, Notifier};
pub use registration::{RegistrationService, RegistrationSubmitter};
