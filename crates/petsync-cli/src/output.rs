//! Terminal rendering of notifications and submission outcomes.

use anyhow::Result;
use colored::Colorize;
use petsync_application::{Confirmation, SubmitOutcome};
use petsync_core::notification::{Notification, NotificationLevel};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Error whose message already reached the user through a notification or
/// field list. `main` exits non-zero without printing it again.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command failed")
    }
}

impl std::error::Error for Reported {}

pub fn print_notification(notification: &Notification) {
    let line = match notification.level {
        NotificationLevel::Success => format!("✓ {}", notification.message).green(),
        NotificationLevel::Info => format!("ℹ {}", notification.message).blue(),
        NotificationLevel::Warning => format!("⚠ {}", notification.message).yellow(),
        NotificationLevel::Error => format!("✗ {}", notification.message).red(),
    };
    if notification.is_error() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Unwraps a submission for the command that started it.
///
/// `Ok(None)` means there is nothing more to do (cancelled or discarded).
pub fn finish<T>(outcome: SubmitOutcome<T>) -> Result<Option<T>> {
    match outcome {
        SubmitOutcome::Completed(value) => Ok(Some(value)),
        SubmitOutcome::Rejected(errors) => {
            eprintln!("{}", "Please correct the following fields:".red().bold());
            for (field, message) in errors.iter() {
                eprintln!("  {} {}", format!("{field}:").bold(), message.red());
            }
            Err(Reported.into())
        }
        SubmitOutcome::Failed(_) => Err(Reported.into()),
        SubmitOutcome::Cancelled => {
            println!("{}", "Cancelled.".yellow());
            Ok(None)
        }
        SubmitOutcome::Discarded => Ok(None),
    }
}

/// Asks for confirmation on stdin unless `assume_yes` is set.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<Confirmation> {
    if assume_yes {
        return Ok(Confirmation::Confirmed);
    }

    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim();
    Ok(Confirmation::from_flag(
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"),
    ))
}

pub fn heading(title: &str) {
    println!("{}", title.bold().underline());
}
