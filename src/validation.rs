//! Request body validation.
//!
//! Handlers take a [`ValidJson<T>`] instead of `Json<T>`. The body is parsed
//! as loose JSON first, then `T::validate` runs every rule for the endpoint and
//! either builds the typed request or returns all field errors at once.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{
    auth::dto::{LoginRequest, RegisterRequest},
    error::{ApiError, FieldError},
    preferences::dto::UpdatePreferencesRequest,
};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;

const MSG_NAME: &str = "Name must be between 2 and 50 characters";
const MSG_EMAIL: &str = "Please provide a valid email address";
const MSG_PASSWORD_LEN: &str = "Password must be at least 6 characters long";
const MSG_PASSWORD_REQUIRED: &str = "Password is required";
const MSG_PREFS_ARRAY: &str = "Preferences must be an array";
const MSG_PREF_STRING: &str = "Each preference must be a string";

/// Builds a typed request out of an untyped JSON body.
pub trait Validate: Sized {
    fn validate(body: &Value) -> Result<Self, Vec<FieldError>>;
}

/// JSON body extractor that rejects with a 400 listing every failed rule.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rej| ApiError::Validation(vec![FieldError::new("body", rej.body_text())]))?;
        T::validate(&body).map(ValidJson).map_err(ApiError::Validation)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Lowercase and canonicalize an address so equivalent spellings share one account.
///
/// Gmail ignores dots and `+tag` suffixes in the local part and treats
/// `googlemail.com` as `gmail.com`. Outlook and iCloud drop `+tag`
/// subaddresses, Yahoo drops `-tag` ones.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.rsplit_once('@') else {
        return email;
    };
    let strip = |sep: char| local.split_once(sep).map_or(local, |(base, _)| base);
    match domain {
        "gmail.com" | "googlemail.com" => format!("{}@gmail.com", strip('+').replace('.', "")),
        "outlook.com" | "hotmail.com" | "live.com" | "msn.com" | "icloud.com" | "me.com"
        | "mac.com" => format!("{}@{}", strip('+'), domain),
        "yahoo.com" | "ymail.com" | "rocketmail.com" => format!("{}@{}", strip('-'), domain),
        _ => email,
    }
}

// --- rules ---

fn trimmed_length(
    body: &Value,
    field: &str,
    min: usize,
    max: usize,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field).and_then(Value::as_str).map(str::trim) {
        Some(s) if (min..=max).contains(&s.chars().count()) => Some(s.to_string()),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn email(body: &Value, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get(field).and_then(Value::as_str).map(str::trim) {
        Some(s) if is_valid_email(s) => Some(normalize_email(s)),
        _ => {
            errors.push(FieldError::new(field, MSG_EMAIL));
            None
        }
    }
}

fn min_length(
    body: &Value,
    field: &str,
    min: usize,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field).and_then(Value::as_str) {
        Some(s) if s.chars().count() >= min => Some(s.to_string()),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// `field` must be an array of strings; an absent field is `Some(vec![])`
/// unless `required`. An explicit `null` is never treated as absent.
fn string_list(
    body: &Value,
    field: &str,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<String>> {
    let items = match body.get(field) {
        None if !required => return Some(Vec::new()),
        Some(Value::Array(items)) => items,
        _ => {
            errors.push(FieldError::new(field, MSG_PREFS_ARRAY));
            return None;
        }
    };

    let mut out = Vec::with_capacity(items.len());
    let mut ok = true;
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                errors.push(FieldError::new(format!("{}[{}]", field, i), MSG_PREF_STRING));
                ok = false;
            }
        }
    }
    ok.then_some(out)
}

// --- per-endpoint rule sets ---

impl Validate for RegisterRequest {
    fn validate(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = trimmed_length(body, "name", NAME_MIN, NAME_MAX, MSG_NAME, &mut errors);
        let email = email(body, "email", &mut errors);
        let password = min_length(body, "password", PASSWORD_MIN, MSG_PASSWORD_LEN, &mut errors);
        let preferences = string_list(body, "preferences", false, &mut errors);

        match (name, email, password, preferences) {
            (Some(name), Some(email), Some(password), Some(preferences)) if errors.is_empty() => {
                Ok(Self {
                    name,
                    email,
                    password,
                    preferences,
                })
            }
            _ => Err(errors),
        }
    }
}

impl Validate for LoginRequest {
    fn validate(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let email = email(body, "email", &mut errors);
        let password = min_length(body, "password", 1, MSG_PASSWORD_REQUIRED, &mut errors);

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Self { email, password }),
            _ => Err(errors),
        }
    }
}

impl Validate for UpdatePreferencesRequest {
    fn validate(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        match string_list(body, "preferences", true, &mut errors) {
            Some(preferences) if errors.is_empty() => Ok(Self { preferences }),
            _ => Err(errors),
        }
    }
}
