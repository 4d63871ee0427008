//! Declarative field validation.
//!
//! A form is described by a static table of [`FieldSpec`]s, each listing the
//! [`Rule`]s of one field. [`validate`] walks the table against any type
//! implementing [`FormValues`] and reports the first failing rule per field.
//!
//! Rules other than [`Rule::Required`] only apply to non-empty values, so an
//! optional field is simply one without `Required`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

static LOOSE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+").expect("static regex should not panic"));
static STRICT_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex should not panic"));

/// Email acceptance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPattern {
    /// `\S+@\S+` (registration).
    Loose,
    /// `^[^\s@]+@[^\s@]+\.[^\s@]+$` (login).
    Strict,
}

impl EmailPattern {
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Loose => LOOSE_EMAIL.is_match(value),
            Self::Strict => STRICT_EMAIL.is_match(value),
        }
    }
}

/// One constraint on a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    MinChars(usize),
    MaxChars(usize),
    Email(EmailPattern),
    NumberRange {
        min: f64,
        max: f64,
        /// `true` makes the lower bound exclusive.
        min_exclusive: bool,
    },
    OneOf(&'static [&'static str]),
    NotInFuture,
    /// Text must equal the named field.
    SameAs(&'static str),
}

/// A field and the rules it must satisfy, in reporting order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, label, rules }
    }
}

/// A raw field value as entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Date(Option<NaiveDate>),
}

impl FieldValue<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(number) => number.is_none(),
            Self::Date(date) => date.is_none(),
        }
    }
}

/// Read access to a form's fields by name.
pub trait FormValues {
    fn value(&self, field: &str) -> FieldValue<'_>;
}

/// Per-field messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(value)` when empty, otherwise the errors.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Checks every field of `table` against `form`.
///
/// # Arguments
///
/// * `table` - Field specs in reporting order
/// * `form` - Source of the raw values
/// * `today` - Reference date for [`Rule::NotInFuture`]
pub fn validate(table: &[FieldSpec], form: &dyn FormValues, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in table {
        let value = form.value(spec.name);
        if let Some(message) = check_field(spec, value, form, today) {
            errors.insert(spec.name, message);
        }
    }
    errors
}

fn check_field(
    spec: &FieldSpec,
    value: FieldValue<'_>,
    form: &dyn FormValues,
    today: NaiveDate,
) -> Option<String> {
    let label = spec.label;
    if value.is_empty() {
        return spec
            .rules
            .contains(&Rule::Required)
            .then(|| format!("{label} is required"));
    }

    for rule in spec.rules {
        let failed = match (rule, value) {
            (Rule::Required, _) => None,
            (Rule::MinChars(min), FieldValue::Text(text)) => (text.trim().chars().count() < *min)
                .then(|| format!("{label} must be at least {min} characters")),
            (Rule::MaxChars(max), FieldValue::Text(text)) => (text.trim().chars().count() > *max)
                .then(|| format!("{label} must be at most {max} characters")),
            (Rule::Email(pattern), FieldValue::Text(text)) => (!pattern.is_match(text.trim()))
                .then(|| "Invalid email address".to_string()),
            (
                Rule::NumberRange {
                    min,
                    max,
                    min_exclusive,
                },
                FieldValue::Number(Some(number)),
            ) => {
                let below = if *min_exclusive {
                    number <= *min
                } else {
                    number < *min
                };
                (!number.is_finite() || below || number > *max).then(|| {
                    if *min_exclusive {
                        format!("{label} must be greater than {min} and at most {max}")
                    } else {
                        format!("{label} must be between {min} and {max}")
                    }
                })
            }
            (Rule::OneOf(allowed), FieldValue::Text(text)) => {
                let known = allowed.iter().any(|option| *option == text.trim());
                (!known).then(|| format!("Select a valid {}", label.to_lowercase()))
            }
            (Rule::NotInFuture, FieldValue::Date(Some(date))) => {
                (date > today).then(|| format!("{label} cannot be in the future"))
            }
            (Rule::SameAs(other), FieldValue::Text(text)) => match form.value(other) {
                FieldValue::Text(other_text) if other_text == text => None,
                _ => Some("Passwords do not match".to_string()),
            },
            // Rule does not apply to this kind of value.
            _ => None,
        };
        if failed.is_some() {
            return failed;
        }
    }
    None
}
