//! User domain models.

use crate::types::{UserId, date_format};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An authenticated account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(with = "date_format")]
    pub birthday: NaiveDate,
}

impl User {
    /// Display name used in greetings and the settings header.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}

/// Payload for account registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(with = "date_format")]
    pub birthday: NaiveDate,
}

/// Payload for a profile update. An empty password keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(with = "date_format")]
    pub birthday: NaiveDate,
}
