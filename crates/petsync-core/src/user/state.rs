//! In-memory mirror of the authenticated user.
//!
//! Edit forms stage changes here field by field before submission. Nothing in
//! this module touches durable storage: callers persist through the
//! [`SessionRepository`](crate::session::SessionRepository) after a successful
//! remote update.

use super::model::User;
use crate::types::UserId;
use chrono::NaiveDate;

/// Current user fields, or their empty defaults when signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSessionState {
    pub id: Option<UserId>,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    /// Staged new password; never part of [`User`].
    pub password: String,
    pub birthday: Option<NaiveDate>,
}

impl UserSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every field of `user` in, or resets all fields when `None`.
    pub fn set_user(&mut self, user: Option<&User>) {
        match user {
            Some(user) => {
                self.id = Some(user.id);
                self.name = user.name.clone();
                self.surname = user.surname.clone();
                self.email = user.email.clone();
                self.phone = user.phone.clone();
                self.birthday = Some(user.birthday);
            }
            None => *self = Self::default(),
        }
    }

    /// Equivalent to `set_user(None)`.
    pub fn reset_user(&mut self) {
        self.set_user(None);
    }

    pub fn is_signed_in(&self) -> bool {
        self.id.is_some()
    }

    /// Rebuilds a [`User`] from the staged fields, if the state is complete.
    pub fn to_user(&self) -> Option<User> {
        Some(User {
            id: self.id?,
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            birthday: self.birthday?,
        })
    }

    // ============================================================================
    // Field setters (no validation at this layer)
    // ============================================================================

    pub fn set_id(&mut self, value: UserId) {
        self.id = Some(value);
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_surname(&mut self, value: impl Into<String>) {
        self.surname = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn set_birthday(&mut self, value: NaiveDate) {
        self.birthday = Some(value);
    }
}
