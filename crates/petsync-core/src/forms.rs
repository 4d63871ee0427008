//! Form inputs and their validation tables.
//!
//! Every form holds raw, possibly incomplete values. `validate_at` checks the
//! form's static table and, on success, produces the typed payload the
//! gateway expects. Nothing here performs I/O.

use crate::pet::{Gender, Pet, PetDraft};
use crate::record::{
    ACTIVITY_TYPES, DailyActivity, DailyActivityDraft, FEEDING_TYPES, Feeding, FeedingDraft,
    MEDICAL_TYPES, MedicalHistory, MedicalHistoryDraft,
};
use crate::user::{NewUser, ProfileUpdate, UserSessionState};
use crate::validation::{
    EmailPattern, FieldErrors, FieldSpec, FieldValue, FormValues, Rule, validate,
};
use chrono::{Local, NaiveDate};

/// A form that turns into a typed payload once valid.
pub trait DraftForm: FormValues {
    type Draft;

    /// Validates against `today` and builds the payload.
    fn validate_at(&self, today: NaiveDate) -> Result<Self::Draft, FieldErrors>;

    /// Validates against the local calendar date.
    fn validate(&self) -> Result<Self::Draft, FieldErrors> {
        self.validate_at(Local::now().date_naive())
    }
}

/// Returns the payload if `errors` is empty and every required value is present.
fn complete<T>(errors: FieldErrors, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
    if !errors.is_empty() {
        return Err(errors);
    }
    build().ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.insert("form", "Form is incomplete");
        errors
    })
}

fn number(value: Option<u32>) -> FieldValue<'static> {
    FieldValue::Number(value.map(f64::from))
}

// ============================================================================
// Pet
// ============================================================================

pub const PET_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", &[Rule::Required, Rule::MaxChars(50)]),
    FieldSpec::new("breed", "Breed", &[Rule::Required]),
    FieldSpec::new(
        "gender",
        "Gender",
        &[Rule::Required, Rule::OneOf(&["male", "female"])],
    ),
    FieldSpec::new(
        "weight",
        "Weight",
        &[
            Rule::Required,
            Rule::NumberRange {
                min: 0.0,
                max: 60.0,
                min_exclusive: true,
            },
        ],
    ),
    FieldSpec::new("birthday", "Birthday", &[Rule::Required, Rule::NotInFuture]),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetForm {
    pub name: String,
    pub breed: String,
    /// `male` or `female`.
    pub gender: String,
    /// Kilograms.
    pub weight: Option<f64>,
    pub birthday: Option<NaiveDate>,
    /// Filled by the best-effort breed photo lookup.
    pub photo: String,
}

impl PetForm {
    /// Prefills the form for editing `pet`.
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            breed: pet.breed.clone(),
            gender: pet.gender.to_lowercase(),
            weight: Some(pet.weight),
            birthday: pet.birthday,
            photo: pet.photo.clone(),
        }
    }
}

impl FormValues for PetForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => FieldValue::Text(&self.name),
            "breed" => FieldValue::Text(&self.breed),
            "gender" => FieldValue::Text(&self.gender),
            "weight" => FieldValue::Number(self.weight),
            "birthday" => FieldValue::Date(self.birthday),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for PetForm {
    type Draft = PetDraft;

    fn validate_at(&self, today: NaiveDate) -> Result<PetDraft, FieldErrors> {
        let errors = validate(PET_FIELDS, self, today);
        complete(errors, || {
            Some(PetDraft {
                name: self.name.trim().to_string(),
                breed: self.breed.trim().to_string(),
                gender: self.gender.parse::<Gender>().ok()?,
                weight: self.weight?,
                birthday: self.birthday?,
                photo: self.photo.clone(),
            })
        })
    }
}

// ============================================================================
// Feeding
// ============================================================================

pub const FEEDING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("type", "Type", &[Rule::Required, Rule::OneOf(FEEDING_TYPES)]),
    FieldSpec::new(
        "description",
        "Description",
        &[Rule::Required, Rule::MinChars(3), Rule::MaxChars(500)],
    ),
    FieldSpec::new(
        "quantity",
        "Quantity",
        &[
            Rule::Required,
            Rule::NumberRange {
                min: 1.0,
                max: 500.0,
                min_exclusive: false,
            },
        ],
    ),
    FieldSpec::new("date", "Date", &[Rule::Required]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedingForm {
    pub kind: String,
    pub description: String,
    /// Grams.
    pub quantity: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl From<&Feeding> for FeedingForm {
    fn from(feeding: &Feeding) -> Self {
        Self {
            kind: feeding.kind.clone(),
            description: feeding.description.clone(),
            quantity: Some(feeding.quantity),
            date: Some(feeding.date),
        }
    }
}

impl FormValues for FeedingForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "type" => FieldValue::Text(&self.kind),
            "description" => FieldValue::Text(&self.description),
            "quantity" => number(self.quantity),
            "date" => FieldValue::Date(self.date),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for FeedingForm {
    type Draft = FeedingDraft;

    fn validate_at(&self, today: NaiveDate) -> Result<FeedingDraft, FieldErrors> {
        let errors = validate(FEEDING_FIELDS, self, today);
        complete(errors, || {
            Some(FeedingDraft {
                kind: self.kind.trim().to_string(),
                description: self.description.trim().to_string(),
                quantity: self.quantity?,
                date: self.date?,
            })
        })
    }
}

// ============================================================================
// Daily activity
// ============================================================================

pub const ACTIVITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("type", "Type", &[Rule::Required, Rule::OneOf(ACTIVITY_TYPES)]),
    FieldSpec::new(
        "duration",
        "Duration",
        &[
            Rule::Required,
            Rule::NumberRange {
                min: 1.0,
                max: 1440.0,
                min_exclusive: false,
            },
        ],
    ),
    FieldSpec::new(
        "notes",
        "Notes",
        &[Rule::Required, Rule::MinChars(1), Rule::MaxChars(500)],
    ),
    FieldSpec::new("date", "Date", &[Rule::Required]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityForm {
    pub kind: String,
    /// Minutes.
    pub duration: Option<u32>,
    pub notes: String,
    pub date: Option<NaiveDate>,
}

impl From<&DailyActivity> for ActivityForm {
    fn from(activity: &DailyActivity) -> Self {
        Self {
            kind: activity.kind.clone(),
            duration: Some(activity.duration),
            notes: activity.notes.clone(),
            date: Some(activity.date),
        }
    }
}

impl FormValues for ActivityForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "type" => FieldValue::Text(&self.kind),
            "duration" => number(self.duration),
            "notes" => FieldValue::Text(&self.notes),
            "date" => FieldValue::Date(self.date),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for ActivityForm {
    type Draft = DailyActivityDraft;

    fn validate_at(&self, today: NaiveDate) -> Result<DailyActivityDraft, FieldErrors> {
        let errors = validate(ACTIVITY_FIELDS, self, today);
        complete(errors, || {
            Some(DailyActivityDraft {
                kind: self.kind.trim().to_string(),
                duration: self.duration?,
                notes: self.notes.trim().to_string(),
                date: self.date?,
            })
        })
    }
}

// ============================================================================
// Medical history
// ============================================================================

pub const MEDICAL_HISTORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("type", "Type", &[Rule::Required, Rule::OneOf(MEDICAL_TYPES)]),
    FieldSpec::new(
        "description",
        "Description",
        &[Rule::Required, Rule::MinChars(5), Rule::MaxChars(1000)],
    ),
    FieldSpec::new("date", "Date", &[Rule::Required]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalHistoryForm {
    pub kind: String,
    pub description: String,
    pub date: Option<NaiveDate>,
}

impl From<&MedicalHistory> for MedicalHistoryForm {
    fn from(history: &MedicalHistory) -> Self {
        Self {
            kind: history.kind.clone(),
            description: history.description.clone(),
            date: Some(history.date),
        }
    }
}

impl FormValues for MedicalHistoryForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "type" => FieldValue::Text(&self.kind),
            "description" => FieldValue::Text(&self.description),
            "date" => FieldValue::Date(self.date),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for MedicalHistoryForm {
    type Draft = MedicalHistoryDraft;

    fn validate_at(&self, today: NaiveDate) -> Result<MedicalHistoryDraft, FieldErrors> {
        let errors = validate(MEDICAL_HISTORY_FIELDS, self, today);
        complete(errors, || {
            Some(MedicalHistoryDraft {
                kind: self.kind.trim().to_string(),
                description: self.description.trim().to_string(),
                date: self.date?,
            })
        })
    }
}

// ============================================================================
// Account forms
// ============================================================================

pub const REGISTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", &[Rule::Required]),
    FieldSpec::new("surname", "Surname", &[Rule::Required]),
    FieldSpec::new(
        "email",
        "Email",
        &[Rule::Required, Rule::Email(EmailPattern::Loose)],
    ),
    FieldSpec::new("phone", "Phone", &[Rule::Required]),
    FieldSpec::new("password", "Password", &[Rule::Required, Rule::MinChars(6)]),
    FieldSpec::new("birthday", "Birthday", &[Rule::Required]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub birthday: Option<NaiveDate>,
}

impl FormValues for RegisterForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => FieldValue::Text(&self.name),
            "surname" => FieldValue::Text(&self.surname),
            "email" => FieldValue::Text(&self.email),
            "phone" => FieldValue::Text(&self.phone),
            "password" => FieldValue::Text(&self.password),
            "birthday" => FieldValue::Date(self.birthday),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for RegisterForm {
    type Draft = NewUser;

    fn validate_at(&self, today: NaiveDate) -> Result<NewUser, FieldErrors> {
        let errors = validate(REGISTER_FIELDS, self, today);
        complete(errors, || {
            Some(NewUser {
                name: self.name.trim().to_string(),
                surname: self.surname.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                password: self.password.clone(),
                birthday: self.birthday?,
            })
        })
    }
}

pub const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "email",
        "Email",
        &[Rule::Required, Rule::Email(EmailPattern::Strict)],
    ),
    FieldSpec::new("password", "Password", &[Rule::Required]),
];

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormValues for LoginForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "email" => FieldValue::Text(&self.email),
            "password" => FieldValue::Text(&self.password),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for LoginForm {
    type Draft = Credentials;

    fn validate_at(&self, today: NaiveDate) -> Result<Credentials, FieldErrors> {
        let errors = validate(LOGIN_FIELDS, self, today);
        complete(errors, || {
            Some(Credentials {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            })
        })
    }
}

pub const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", &[Rule::Required]),
    FieldSpec::new("surname", "Surname", &[Rule::Required]),
    FieldSpec::new(
        "email",
        "Email",
        &[Rule::Required, Rule::Email(EmailPattern::Loose)],
    ),
    FieldSpec::new("phone", "Phone", &[Rule::Required]),
    FieldSpec::new(
        "password",
        "Password",
        &[Rule::MinChars(6), Rule::SameAs("confirm_password")],
    ),
    FieldSpec::new(
        "confirm_password",
        "Password confirmation",
        &[Rule::SameAs("password")],
    ),
    FieldSpec::new("birthday", "Birthday", &[Rule::Required]),
];

/// Settings page form. An empty password keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub birthday: Option<NaiveDate>,
}

impl ProfileForm {
    /// Prefills from the staged session fields.
    pub fn from_state(state: &UserSessionState) -> Self {
        Self {
            name: state.name.clone(),
            surname: state.surname.clone(),
            email: state.email.clone(),
            phone: state.phone.clone(),
            password: state.password.clone(),
            confirm_password: state.password.clone(),
            birthday: state.birthday,
        }
    }
}

impl FormValues for ProfileForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => FieldValue::Text(&self.name),
            "surname" => FieldValue::Text(&self.surname),
            "email" => FieldValue::Text(&self.email),
            "phone" => FieldValue::Text(&self.phone),
            "password" => FieldValue::Text(&self.password),
            "confirm_password" => FieldValue::Text(&self.confirm_password),
            "birthday" => FieldValue::Date(self.birthday),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for ProfileForm {
    type Draft = ProfileUpdate;

    fn validate_at(&self, today: NaiveDate) -> Result<ProfileUpdate, FieldErrors> {
        let errors = validate(PROFILE_FIELDS, self, today);
        complete(errors, || {
            Some(ProfileUpdate {
                name: self.name.trim().to_string(),
                surname: self.surname.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                password: (!self.password.is_empty()).then(|| self.password.clone()),
                birthday: self.birthday?,
            })
        })
    }
}

pub const FORGOT_PASSWORD_FIELDS: &[FieldSpec] = &[FieldSpec::new(
    "email",
    "Email",
    &[Rule::Required, Rule::Email(EmailPattern::Strict)],
)];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl FormValues for ForgotPasswordForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "email" => FieldValue::Text(&self.email),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for ForgotPasswordForm {
    type Draft = String;

    fn validate_at(&self, today: NaiveDate) -> Result<String, FieldErrors> {
        let errors = validate(FORGOT_PASSWORD_FIELDS, self, today);
        complete(errors, || Some(self.email.trim().to_string()))
    }
}

pub const RESET_PASSWORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("token", "Reset token", &[Rule::Required]),
    FieldSpec::new("password", "Password", &[Rule::Required, Rule::MinChars(6)]),
    FieldSpec::new(
        "confirm_password",
        "Password confirmation",
        &[Rule::Required, Rule::SameAs("password")],
    ),
];

/// Validated password reset confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormValues for ResetPasswordForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "token" => FieldValue::Text(&self.token),
            "password" => FieldValue::Text(&self.password),
            "confirm_password" => FieldValue::Text(&self.confirm_password),
            _ => FieldValue::Text(""),
        }
    }
}

impl DraftForm for ResetPasswordForm {
    type Draft = PasswordReset;

    fn validate_at(&self, today: NaiveDate) -> Result<PasswordReset, FieldErrors> {
        let errors = validate(RESET_PASSWORD_FIELDS, self, today);
        complete(errors, || {
            Some(PasswordReset {
                token: self.token.trim().to_string(),
                password: self.password.clone(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn pet_form() -> PetForm {
        PetForm {
            name: "Kira".to_string(),
            breed: "akita".to_string(),
            gender: "female".to_string(),
            weight: Some(22.5),
            birthday: NaiveDate::from_ymd_opt(2020, 2, 2),
            photo: String::new(),
        }
    }

    #[test]
    fn pet_form_builds_draft() {
        let draft = pet_form().validate_at(today()).unwrap();
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.weight, 22.5);
    }

    #[test]
    fn pet_weight_bounds() {
        let cases = [
            (0.0, false),
            (0.1, true),
            (60.0, true),
            (61.0, false),
            (f64::NAN, false),
            (f64::INFINITY, false),
            (f64::NEG_INFINITY, false),
        ];
        for (weight, ok) in cases {
            let form = PetForm {
                weight: Some(weight),
                ..pet_form()
            };
            let result = form.validate_at(today());
            assert_eq!(result.is_ok(), ok, "weight {weight}");
            if let Err(errors) = result {
                assert!(errors.contains("weight"));
            }
        }
    }

    #[test]
    fn pet_name_limit_and_gender_catalogue() {
        let form = PetForm {
            name: "x".repeat(51),
            gender: "unknown".to_string(),
            ..pet_form()
        };
        let errors = form.validate_at(today()).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("gender"));
        assert!(!errors.contains("breed"));
    }

    #[test]
    fn pet_birthday_cannot_be_in_the_future() {
        let form = PetForm {
            birthday: today().succ_opt(),
            ..pet_form()
        };
        assert!(form.validate_at(today()).unwrap_err().contains("birthday"));
    }

    #[test]
    fn feeding_limits() {
        let form = FeedingForm {
            kind: "Fresh water".to_string(),
            description: "ab".to_string(),
            quantity: Some(501),
            date: Some(today()),
        };
        let errors = form.validate_at(today()).unwrap_err();
        assert!(errors.contains("description"));
        assert!(errors.contains("quantity"));

        let form = FeedingForm {
            description: "abc".to_string(),
            quantity: Some(500),
            ..form
        };
        assert!(form.validate_at(today()).is_ok());
    }

    #[test]
    fn feeding_type_must_come_from_catalogue() {
        let form = FeedingForm {
            kind: "Pizza".to_string(),
            description: "Leftovers".to_string(),
            quantity: Some(10),
            date: Some(today()),
        };
        assert!(form.validate_at(today()).unwrap_err().contains("type"));
    }

    #[test]
    fn activity_duration_spans_a_day() {
        let form = ActivityForm {
            kind: "Walk".to_string(),
            duration: Some(1441),
            notes: "Park".to_string(),
            date: Some(today()),
        };
        assert!(form.validate_at(today()).unwrap_err().contains("duration"));

        let form = ActivityForm {
            duration: Some(1440),
            ..form
        };
        assert!(form.validate_at(today()).is_ok());
    }

    #[test]
    fn medical_description_minimum() {
        let form = MedicalHistoryForm {
            kind: "Surgery".to_string(),
            description: "knee".to_string(),
            date: Some(today()),
        };
        assert!(form.validate_at(today()).unwrap_err().contains("description"));
    }

    #[test]
    fn login_requires_strict_email() {
        let form = LoginForm {
            email: "ana@example".to_string(),
            password: "x".to_string(),
        };
        assert!(form.validate_at(today()).unwrap_err().contains("email"));

        let form = LoginForm {
            email: "ana@example.com".to_string(),
            ..form
        };
        assert!(form.validate_at(today()).is_ok());
    }

    #[test]
    fn register_password_minimum() {
        let form = RegisterForm {
            name: "Ana".to_string(),
            surname: "García".to_string(),
            email: "ana@example".to_string(),
            phone: "600000000".to_string(),
            password: "12345".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
        };
        let errors = form.validate_at(today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("password"));
    }

    #[test]
    fn profile_password_is_optional_but_must_match() {
        let base = ProfileForm {
            name: "Ana".to_string(),
            surname: "García".to_string(),
            email: "ana@example.com".to_string(),
            phone: "600000000".to_string(),
            password: String::new(),
            confirm_password: String::new(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
        };
        let update = base.validate_at(today()).unwrap();
        assert_eq!(update.password, None);

        let mismatched = ProfileForm {
            password: "secret1".to_string(),
            ..base.clone()
        };
        assert!(mismatched.validate_at(today()).unwrap_err().contains("password"));

        let matched = ProfileForm {
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..base
        };
        assert_eq!(
            matched.validate_at(today()).unwrap().password.as_deref(),
            Some("secret1")
        );
    }

    #[test]
    fn reset_password_requires_equal_passwords() {
        let form = ResetPasswordForm {
            token: "abc".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };
        assert!(form
            .validate_at(today())
            .unwrap_err()
            .contains("confirm_password"));
    }
}
