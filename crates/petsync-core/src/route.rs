//! Navigable routes and which of them require a session.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    Landing,
    Login,
    Register,
    ForgotPassword,
    ChangePassword,
    Home,
    Settings,
    Feedings,
    DailyActivities,
    MedicalHistories,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/account/login",
            Self::Register => "/account/register",
            Self::ForgotPassword => "/account/forgot-password",
            Self::ChangePassword => "/account/change-password",
            Self::Home => "/home",
            Self::Settings => "/account/settings",
            Self::Feedings => "/pet/feedings",
            Self::DailyActivities => "/pet/daily-activities",
            Self::MedicalHistories => "/pet/medical-histories",
        }
    }

    /// Protected routes render only with a valid persisted session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::Settings
                | Self::Feedings
                | Self::DailyActivities
                | Self::MedicalHistories
        )
    }

    /// Resolves an exact path.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::iter().find(|route| route.path() == path)
    }

    /// Where unauthenticated visitors of protected routes are sent.
    pub const SIGN_IN: Route = Route::Login;

    /// Landing page after login.
    pub const AFTER_SIGN_IN: Route = Route::Home;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_back_to_routes() {
        for route in Route::iter() {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn only_app_pages_are_protected() {
        let protected: Vec<_> = Route::iter().filter(Route::is_protected).collect();
        assert_eq!(protected.len(), 5);
        assert!(!Route::Login.is_protected());
        assert!(!Route::ChangePassword.is_protected());
        assert!(Route::Feedings.is_protected());
    }
}
