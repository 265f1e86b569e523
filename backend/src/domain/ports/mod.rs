//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod notification_count_source;
mod principal_directory;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use notification_count_source::MockNotificationCountSource;
pub use notification_count_source::{
    FixtureNotificationCountSource, NotificationCountSource, NotificationCountSourceError,
};
#[cfg(test)]
pub use principal_directory::MockPrincipalDirectory;
pub use principal_directory::{
    FIXTURE_PASSWORD, FixturePrincipalDirectory, PrincipalDirectory, PrincipalDirectoryError,
    fixture_principals,
};
