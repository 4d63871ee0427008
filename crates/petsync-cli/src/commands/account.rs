use crate::RegisterArgs;
use crate::bootstrap::App;
use crate::output;
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use petsync_application::GuardState;
use petsync_core::forms::{
    ForgotPasswordForm, LoginForm, ProfileForm, RegisterForm, ResetPasswordForm,
};
use petsync_core::route::Route;

pub async fn login(app: &App, email: String, password: String) -> Result<()> {
    if let GuardState::Redirecting { .. } = app.guard.check(Route::Login).await {
        if let Some(user) = app.auth.restore_session().await {
            println!("Already signed in as {}.", user.email.bold());
        }
        return Ok(());
    }

    let form = LoginForm { email, password };
    let Some(user) = output::finish(app.auth.login(&form).await)? else {
        return Ok(());
    };

    // Roster problems surface as notifications; the sign-in itself succeeded
    app.pets.refresh_roster().await;
    println!("Signed in as {} <{}>", user.full_name().bold(), user.email);
    if let Some(pet) = app.pets.selection().await.name() {
        println!("Active pet: {}", pet.cyan());
    }
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let form = RegisterForm {
        name: args.name,
        surname: args.surname,
        email: args.email,
        phone: args.phone,
        password: args.password,
        birthday: Some(args.birthday),
    };

    if output::finish(app.auth.register(&form).await)?.is_some() {
        println!("You can now sign in with `petsync login`.");
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.auth.logout().await?;
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let user = app.authorize_with_pets(Route::Home).await?;

    output::heading(&user.full_name());
    println!("  Email:    {}", user.email);
    println!("  Phone:    {}", user.phone);
    println!("  Birthday: {}", user.birthday);
    match app.pets.selection().await.name() {
        Some(pet) => println!("  Active pet: {}", pet.cyan()),
        None => println!("  Active pet: {}", "none".dimmed()),
    }
    Ok(())
}

/// Profile fields given on the command line; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl ProfileChanges {
    fn apply(self, form: &mut ProfileForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(surname) = self.surname {
            form.surname = surname;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
        if let Some(birthday) = self.birthday {
            form.birthday = Some(birthday);
        }
        if let Some(password) = self.password {
            form.password = password;
            form.confirm_password = self.confirm_password.unwrap_or_default();
        }
    }
}

pub async fn update_settings(app: &App, changes: ProfileChanges) -> Result<()> {
    app.authorize(Route::Settings).await?;

    let mut form = ProfileForm::from_state(&*app.stores.user.read().await);
    changes.apply(&mut form);

    output::finish(app.auth.update_profile(&form).await)?;
    Ok(())
}

pub async fn delete_account(app: &App, yes: bool) -> Result<()> {
    let user = app.authorize(Route::Settings).await?;

    let confirmation = output::confirm(
        &format!("Delete the account {}? This cannot be undone.", user.email),
        yes,
    )?;
    output::finish(app.auth.delete_account(confirmation).await)?;
    Ok(())
}

pub async fn forgot_password(app: &App, email: String) -> Result<()> {
    output::finish(
        app.auth
            .request_password_reset(&ForgotPasswordForm { email })
            .await,
    )?;
    Ok(())
}

pub async fn reset_password(
    app: &App,
    token: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let form = ResetPasswordForm {
        token,
        password,
        confirm_password,
    };
    if output::finish(app.auth.reset_password(&form).await)?.is_some() {
        println!("Sign in with `petsync login` using the new password.");
    }
    Ok(())
}
