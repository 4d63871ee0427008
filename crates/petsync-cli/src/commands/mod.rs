pub mod account;
pub mod pets;
pub mod records;

use crate::bootstrap::App;
use crate::{AccountAction, Commands, PasswordAction, SettingsAction};
use anyhow::Result;
use petsync_core::forms::{ActivityForm, FeedingForm, MedicalHistoryForm};
use petsync_core::route::Route;

pub async fn dispatch(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => account::login(app, email, password).await,
        Commands::Register(args) => account::register(app, args).await,
        Commands::Logout => account::logout(app).await,
        Commands::Whoami => account::whoami(app).await,
        Commands::Settings { action } => match action {
            SettingsAction::Update {
                name,
                surname,
                email,
                phone,
                birthday,
                password,
                confirm_password,
            } => {
                let changes = account::ProfileChanges {
                    name,
                    surname,
                    email,
                    phone,
                    birthday,
                    password,
                    confirm_password,
                };
                account::update_settings(app, changes).await
            }
        },
        Commands::Account { action } => match action {
            AccountAction::Delete { yes } => account::delete_account(app, yes).await,
        },
        Commands::Password { action } => match action {
            PasswordAction::Forgot { email } => account::forgot_password(app, email).await,
            PasswordAction::Reset {
                token,
                password,
                confirm_password,
            } => account::reset_password(app, token, password, confirm_password).await,
        },
        Commands::Pets { action } => pets::run(app, action).await,
        Commands::Breeds { action } => pets::run_breeds(app, action).await,
        Commands::Feedings { action } => {
            records::run::<_, FeedingForm>(
                app,
                &app.feedings,
                Route::Feedings,
                action,
            )
            .await
        }
        Commands::Activities { action } => {
            records::run::<_, ActivityForm>(
                app,
                &app.activities,
                Route::DailyActivities,
                action,
            )
            .await
        }
        Commands::Medical { action } => {
            records::run::<_, MedicalHistoryForm>(
                app,
                &app.medical,
                Route::MedicalHistories,
                action,
            )
            .await
        }
    }
}
