//! Results of a form submission.

use crate::dispose::DisposeGuard;
use petsync_core::notification::{Notification, Notifier};
use petsync_core::validation::FieldErrors;

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// The gateway accepted the request and local state was updated.
    Completed(T),
    /// Client-side validation failed; the gateway was not called.
    Rejected(FieldErrors),
    /// The gateway (or local persistence) reported an error.
    Failed(String),
    /// A destructive action was not confirmed.
    Cancelled,
    /// The owner was disposed while the request was in flight.
    Discarded,
}

impl<T> SubmitOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Rejected(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SubmitOutcome<U> {
        match self {
            Self::Completed(value) => SubmitOutcome::Completed(f(value)),
            Self::Rejected(errors) => SubmitOutcome::Rejected(errors),
            Self::Failed(message) => SubmitOutcome::Failed(message),
            Self::Cancelled => SubmitOutcome::Cancelled,
            Self::Discarded => SubmitOutcome::Discarded,
        }
    }
}

/// Explicit answer to a "are you sure?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Surfaces a failure as an error notification, unless the owner is gone.
pub(crate) fn report_failure<T>(
    notifier: &dyn Notifier,
    guard: &DisposeGuard,
    message: impl Into<String>,
) -> SubmitOutcome<T> {
    if guard.is_disposed() {
        return SubmitOutcome::Discarded;
    }
    let message = message.into();
    notifier.notify(Notification::error(message.clone()));
    SubmitOutcome::Failed(message)
}
