//! Step validation guard rails for wizard input.

use crate::schema::{FieldKey, FieldRule, FieldSpec, WizardSchema};
use crate::snapshot::FieldValues;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: FieldKey,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(failure) => Some(failure),
        }
    }
}

/// Which wording to use for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMode {
    Step,
    Submit,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn check_field(spec: &FieldSpec, value: &str, mode: MessageMode) -> Option<ValidationFailure> {
    let trimmed = value.trim();
    let ok = match &spec.rule {
        FieldRule::Optional => true,
        FieldRule::Required => !trimmed.is_empty(),
        FieldRule::OneOf { options } => {
            !trimmed.is_empty() && options.iter().any(|opt| opt.as_str() == trimmed)
        }
        FieldRule::Email => !trimmed.is_empty() && is_valid_email(trimmed),
    };
    if ok {
        return None;
    }

    let message = match mode {
        MessageMode::Step => spec.message(),
        MessageMode::Submit => spec.submit_message(),
    };
    Some(ValidationFailure {
        field: spec.key,
        message,
    })
}

fn validate_step_with<V>(
    schema: &WizardSchema,
    step: usize,
    values: &V,
    mode: MessageMode,
) -> ValidationResult
where
    V: FieldValues + ?Sized,
{
    let Some(step_schema) = schema.step(step) else {
        return ValidationResult::Valid;
    };

    step_schema
        .fields
        .iter()
        .find_map(|spec| check_field(spec, &values.field_value(spec.key), mode))
        .map(ValidationResult::Invalid)
        .unwrap_or(ValidationResult::Valid)
}

/// Validate one step; the first failing field in declaration order wins.
pub fn validate_step<V>(schema: &WizardSchema, step: usize, values: &V) -> ValidationResult
where
    V: FieldValues + ?Sized,
{
    validate_step_with(schema, step, values, MessageMode::Step)
}

/// Re-run every gating step in order, returning the first failure with its step.
pub fn validate_all<V>(schema: &WizardSchema, values: &V) -> Option<(usize, ValidationFailure)>
where
    V: FieldValues + ?Sized,
{
    schema.gating_steps().into_iter().find_map(|step| {
        match validate_step_with(schema, step, values, MessageMode::Submit) {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(failure) => Some((step, failure)),
        }
    })
}
