//! Request validation for the contact-message endpoints.
//!
//! Every rule for every field is evaluated; violations are collected into a
//! [`FieldErrors`] map keyed by the JSON field name, in rule order.
//!
//! A value is *blank* when it is absent, `null`, an empty string, or `false`.
//! Syntax and length rules skip blank values, so a blank field only ever
//! reports its "required" message. Lengths are counted in characters.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use validator::ValidateEmail;

use crate::schemas::messages::{CreateMessageRequest, ListMessagesQuery};

pub const FULL_NAME_MAX_CHARS: usize = 255;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const MESSAGE_MAX_CHARS: usize = 5000;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_OFFSET: i64 = 0;

const TYPE_STRING: &str = "This value should be of type string.";
const TYPE_BOOL: &str = "This value should be of type bool.";
const TYPE_INT: &str = "This value should be of type int.";

/// Field name → ordered list of human-readable violation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields carrying at least one message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Total number of messages across all fields.
    pub fn count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

// ── Create ────────────────────────────────────────────────────────────────────

/// A create-message payload that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    pub full_name: String,
    pub email: String,
    pub message: String,
    /// Always `true` once validated.
    pub consent: bool,
}

/// Validate a raw create-message payload.
///
/// JSON type mismatches are reported first and, when present, are the only
/// errors returned: the remaining rules only run against well-typed input.
pub fn validate_create(req: &CreateMessageRequest) -> Result<ValidatedMessage, FieldErrors> {
    let mut errors = FieldErrors::new();

    let full_name = text_field(&mut errors, "fullName", req.full_name.as_ref());
    let email = text_field(&mut errors, "email", req.email.as_ref());
    let message = text_field(&mut errors, "message", req.message.as_ref());
    let consent = bool_field(&mut errors, "consent", req.consent.as_ref());

    if !errors.is_empty() {
        return Err(errors);
    }

    check_text(&mut errors, "fullName", full_name, FULL_NAME_MAX_CHARS, TextMessages {
        required: "Full name is required",
        too_long: "Full name cannot be longer than 255 characters",
        invalid_email: None,
    });
    check_text(&mut errors, "email", email, EMAIL_MAX_CHARS, TextMessages {
        required: "Email is required",
        too_long: "Email cannot be longer than 255 characters",
        invalid_email: Some("Email is not valid"),
    });
    check_text(&mut errors, "message", message, MESSAGE_MAX_CHARS, TextMessages {
        required: "Message is required",
        too_long: "Message is too long",
        invalid_email: None,
    });

    // `false` is blank, and it is also not `true`: both rules fire.
    if consent != Some(true) {
        errors.add("consent", "Consent is required");
    }
    if consent == Some(false) {
        errors.add("consent", "Consent must be accepted");
    }

    errors.into_result(ValidatedMessage {
        full_name: full_name.unwrap_or_default().to_owned(),
        email: email.unwrap_or_default().to_owned(),
        message: message.unwrap_or_default().to_owned(),
        consent: true,
    })
}

struct TextMessages {
    required: &'static str,
    too_long: &'static str,
    invalid_email: Option<&'static str>,
}

fn check_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_chars: usize,
    messages: TextMessages,
) {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.add(field, messages.required);
            return;
        }
    };
    if let Some(invalid) = messages.invalid_email {
        if !value.validate_email() {
            errors.add(field, invalid);
        }
    }
    if value.chars().count() > max_chars {
        errors.add(field, messages.too_long);
    }
}

/// `None` for absent or `null`; records a type error for non-strings.
fn text_field<'a>(errors: &mut FieldErrors, field: &str, value: Option<&'a Value>) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.add(field, TYPE_STRING);
            None
        }
    }
}

fn bool_field(errors: &mut FieldErrors, field: &str, value: Option<&Value>) -> Option<bool> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.add(field, TYPE_BOOL);
            None
        }
    }
}

// ── List ──────────────────────────────────────────────────────────────────────

/// Validated pagination window. `limit` is in `1..=100`, `offset` is `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, offset: DEFAULT_OFFSET }
    }
}

/// Validate the `limit` / `offset` query parameters, applying defaults for
/// absent ones.
pub fn validate_list(query: &ListMessagesQuery) -> Result<Pagination, FieldErrors> {
    let mut errors = FieldErrors::new();

    let limit = int_param(&mut errors, "limit", query.limit.as_deref(), DEFAULT_LIMIT);
    let offset = int_param(&mut errors, "offset", query.offset.as_deref(), DEFAULT_OFFSET);

    if let Some(limit) = limit {
        if limit <= 0 {
            errors.add("limit", "This value should be positive.");
        }
        if limit > MAX_LIMIT {
            errors.add("limit", format!("This value should be less than or equal to {MAX_LIMIT}."));
        }
    }
    if let Some(offset) = offset {
        if offset < 0 {
            errors.add("offset", "This value should be either positive or zero.");
        }
    }

    errors.into_result(Pagination {
        limit: limit.unwrap_or(DEFAULT_LIMIT),
        offset: offset.unwrap_or(DEFAULT_OFFSET),
    })
}

fn int_param(errors: &mut FieldErrors, field: &str, raw: Option<&str>, default: i64) -> Option<i64> {
    match raw {
        None => Some(default),
        Some(raw) => match raw.parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.add(field, TYPE_INT);
                None
            }
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
