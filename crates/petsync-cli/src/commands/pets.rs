use crate::bootstrap::App;
use crate::output;
use crate::{BreedAction, PetAction, PetFields};
use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use petsync_core::forms::PetForm;
use petsync_core::pet::{Gender, Pet, PetFilter};
use petsync_core::route::Route;
use petsync_core::types::PetId;

pub async fn run(app: &App, action: PetAction) -> Result<()> {
    match action {
        PetAction::List => list(app).await,
        PetAction::Create(fields) => create(app, fields).await,
        PetAction::Update { id, fields } => update(app, PetId(id), fields).await,
        PetAction::Delete { id, yes } => delete(app, PetId(id), yes).await,
        PetAction::Select { id } => select(app, PetId(id)).await,
        PetAction::Filter {
            name,
            gender,
            max_weight,
        } => {
            let gender = gender.as_deref().map(parse_gender).transpose()?;
            let filter = PetFilter {
                name,
                gender,
                max_weight,
            };
            filter_pets(app, filter).await
        }
    }
}

pub async fn run_breeds(app: &App, action: BreedAction) -> Result<()> {
    match action {
        BreedAction::Search { query } => {
            let suggestions = app.pets.suggest_breeds(&query).await;
            if suggestions.is_empty() {
                println!("{}", "No matching breeds.".dimmed());
            }
            for breed in suggestions {
                println!("{breed}");
            }
            Ok(())
        }
    }
}

fn parse_gender(raw: &str) -> Result<Gender> {
    raw.parse::<Gender>()
        .map_err(|_| anyhow!("Unknown gender '{raw}', expected male or female"))
}

impl PetFields {
    fn apply(self, form: &mut PetForm) {
        if let Some(breed) = self.breed {
            if !breed.eq_ignore_ascii_case(&form.breed) {
                // A new breed needs a new photo
                form.photo.clear();
            }
            form.breed = breed;
        }
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(gender) = self.gender {
            form.gender = gender.to_lowercase();
        }
        if let Some(weight) = self.weight {
            form.weight = Some(weight);
        }
        if let Some(birthday) = self.birthday {
            form.birthday = Some(birthday);
        }
        if let Some(photo) = self.photo {
            form.photo = photo;
        }
    }
}

async fn list(app: &App) -> Result<()> {
    app.authorize(Route::Home).await?;
    let Some(pets) = output::finish(app.pets.list_pets().await)? else {
        return Ok(());
    };
    print_pets(app, &pets).await;
    Ok(())
}

async fn create(app: &App, fields: PetFields) -> Result<()> {
    app.authorize_with_pets(Route::Home).await?;

    let mut form = PetForm::default();
    fields.apply(&mut form);
    if let Some(Some(pet)) = output::finish(app.pets.create_pet(&form).await)? {
        println!("{} #{}", pet.name.bold(), pet.id);
    }
    Ok(())
}

async fn update(app: &App, id: PetId, fields: PetFields) -> Result<()> {
    app.authorize(Route::Home).await?;
    let Some(pets) = output::finish(app.pets.list_pets().await)? else {
        return Ok(());
    };
    let Some(existing) = pets.iter().find(|pet| pet.id == id) else {
        bail!("No pet with id {id}");
    };

    let mut form = PetForm::from_pet(existing);
    fields.apply(&mut form);
    output::finish(app.pets.update_pet(id, &form).await)?;
    Ok(())
}

async fn delete(app: &App, id: PetId, yes: bool) -> Result<()> {
    app.authorize_with_pets(Route::Home).await?;
    let Some(pet) = app.pets.roster().await.into_iter().find(|pet| pet.id == id) else {
        bail!("No pet with id {id}");
    };

    let confirmation = output::confirm(
        &format!("Delete {} and all of its records?", pet.name),
        yes,
    )?;
    output::finish(app.pets.delete_pet(id, confirmation).await)?;
    if let Some(active) = app.pets.selection().await.name() {
        println!("Active pet: {}", active.cyan());
    }
    Ok(())
}

async fn select(app: &App, id: PetId) -> Result<()> {
    app.authorize_with_pets(Route::Home).await?;
    let selection = app.pets.select_pet(id).await?;
    println!(
        "Active pet: {}",
        selection.name().unwrap_or_default().cyan()
    );
    Ok(())
}

async fn filter_pets(app: &App, filter: PetFilter) -> Result<()> {
    app.authorize(Route::Home).await?;
    output::finish(app.pets.list_pets().await)?;

    let matches = app.pets.filter_pets(&filter).await;
    if matches.is_empty() {
        println!("{}", "No pets match.".dimmed());
        return Ok(());
    }
    print_pets(app, &matches).await;
    Ok(())
}

async fn print_pets(app: &App, pets: &[Pet]) {
    if pets.is_empty() {
        println!("{}", "You have no pets yet.".dimmed());
        return;
    }

    let active = app.pets.selection().await.id();
    output::heading("Pets");
    for pet in pets {
        let marker = if Some(pet.id) == active { "*" } else { " " };
        let birthday = pet
            .birthday
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} #{:<4} {:<16} {:<20} {:<7} {:>5.1} kg  {}",
            marker.green(),
            pet.id,
            pet.name.bold(),
            pet.breed,
            pet.gender,
            pet.weight,
            birthday
        );
    }
}
