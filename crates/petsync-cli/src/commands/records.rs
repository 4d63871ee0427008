//! `feedings`, `activities` and `medical` commands, shared by every record kind.

use crate::bootstrap::App;
use crate::output::{self, Reported};
use crate::{RecordAction, RecordFields};
use anyhow::{Result, bail};
use colored::Colorize;
use petsync_application::{RecordCoordinator, RecordView};
use petsync_core::forms::{ActivityForm, DraftForm, FeedingForm, MedicalHistoryForm};
use petsync_core::record::{DailyActivity, Feeding, MedicalHistory, PetRecord};
use petsync_core::route::Route;
use petsync_core::types::RecordId;

/// Copies the command-line fields a form understands.
pub trait ApplyFields {
    fn apply(&mut self, fields: RecordFields);
}

impl ApplyFields for FeedingForm {
    fn apply(&mut self, fields: RecordFields) {
        if let Some(kind) = fields.kind {
            self.kind = kind;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(quantity) = fields.quantity {
            self.quantity = Some(quantity);
        }
        if let Some(date) = fields.date {
            self.date = Some(date);
        }
    }
}

impl ApplyFields for ActivityForm {
    fn apply(&mut self, fields: RecordFields) {
        if let Some(kind) = fields.kind {
            self.kind = kind;
        }
        if let Some(duration) = fields.duration {
            self.duration = Some(duration);
        }
        if let Some(notes) = fields.notes {
            self.notes = notes;
        }
        if let Some(date) = fields.date {
            self.date = Some(date);
        }
    }
}

impl ApplyFields for MedicalHistoryForm {
    fn apply(&mut self, fields: RecordFields) {
        if let Some(kind) = fields.kind {
            self.kind = kind;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(date) = fields.date {
            self.date = Some(date);
        }
    }
}

/// One-line rendering of a record.
pub trait Describe {
    fn describe(&self) -> String;
}

impl Describe for Feeding {
    fn describe(&self) -> String {
        format!(
            "#{}  {}  {}  {} g  {}",
            self.id, self.date, self.kind, self.quantity, self.description
        )
    }
}

impl Describe for DailyActivity {
    fn describe(&self) -> String {
        format!(
            "#{}  {}  {}  {} min  {}",
            self.id, self.date, self.kind, self.duration, self.notes
        )
    }
}

impl Describe for MedicalHistory {
    fn describe(&self) -> String {
        format!(
            "#{}  {}  {}  {}",
            self.id, self.date, self.kind, self.description
        )
    }
}

pub async fn run<R, F>(
    app: &App,
    coordinator: &RecordCoordinator<R>,
    route: Route,
    action: RecordAction,
) -> Result<()>
where
    R: PetRecord + Describe,
    F: DraftForm<Draft = R::Draft> + ApplyFields + Default + for<'a> From<&'a R>,
{
    if let RecordAction::Types = action {
        for kind in R::KIND.catalogue() {
            println!("{kind}");
        }
        return Ok(());
    }

    app.authorize_with_pets(route).await?;

    match action {
        RecordAction::Types => Ok(()),
        RecordAction::List => list(app, coordinator).await,
        RecordAction::Add(fields) => {
            let mut form = F::default();
            form.apply(fields);
            if let Some(record) = output::finish(coordinator.create(&form).await)? {
                if record.id().is_provisional() {
                    println!("{}", "Saved; the server did not report an id yet.".dimmed());
                } else {
                    println!("{}", record.describe());
                }
            }
            Ok(())
        }
        RecordAction::Edit { id, fields } => {
            let id = RecordId(id);
            load(coordinator).await?;
            let Some(existing) = coordinator.find(id).await else {
                bail!("No {} with id {id} for the active pet", R::KIND.label());
            };

            let mut form = F::from(&existing);
            form.apply(fields);
            if let Some(record) = output::finish(coordinator.edit(id, &form).await)? {
                println!("{}", record.describe());
            }
            Ok(())
        }
        RecordAction::Delete { id, yes } => {
            let confirmation =
                output::confirm(&format!("Delete {} #{id}?", R::KIND.label()), yes)?;
            output::finish(coordinator.delete(RecordId(id), confirmation).await)?;
            Ok(())
        }
    }
}

/// Refreshes and fails the command when the list could not be loaded.
async fn load<R: PetRecord>(coordinator: &RecordCoordinator<R>) -> Result<RecordView<R>> {
    match coordinator.refresh().await {
        RecordView::Error(_) => Err(Reported.into()),
        view => Ok(view),
    }
}

async fn list<R: PetRecord + Describe>(app: &App, coordinator: &RecordCoordinator<R>) -> Result<()> {
    let pet = app
        .pets
        .selection()
        .await
        .name()
        .unwrap_or("the active pet")
        .to_string();

    match load(coordinator).await? {
        RecordView::NoPets => {
            println!("You have no pets yet. Add one with `petsync pets create`.");
        }
        RecordView::Empty { detail } => {
            let message = detail.unwrap_or_else(|| format!("No {} entries for {pet}.", R::KIND.label()));
            println!("{}", message.dimmed());
        }
        RecordView::Records(records) => {
            output::heading(&format!("{} of {pet}", capitalize(R::KIND.label())));
            for record in records {
                println!("{}", record.describe());
            }
        }
        RecordView::Error(_) => return Err(Reported.into()),
    }
    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use petsync_core::types::PetId;

    #[test]
    fn edit_fields_override_prefilled_values() {
        let feeding = Feeding {
            id: RecordId(3),
            pet_id: Some(PetId(1)),
            kind: "Dry kibble".to_string(),
            description: "Morning bowl".to_string(),
            quantity: 120,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        let mut form = FeedingForm::from(&feeding);

        form.apply(RecordFields {
            quantity: Some(150),
            notes: Some("ignored for feedings".to_string()),
            ..RecordFields::default()
        });

        assert_eq!(form.quantity, Some(150));
        assert_eq!(form.description, "Morning bowl");
    }

    #[test]
    fn labels_are_capitalized_for_headings() {
        assert_eq!(capitalize("daily activity"), "Daily activity");
        assert_eq!(capitalize(""), "");
    }
}
