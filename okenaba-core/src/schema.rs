//! Wizard schema: the per-variant step and field configuration.
//!
//! Step layouts, required-ness and validators are data. The two built-in
//! variants ship as TOML under `schemas/` and go through the same parser and
//! checks as a user-supplied schema file.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use okenaba_error::WizardError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const BUSINESS_SCHEMA: &str = include_str!("../schemas/business.toml");
const PERSONAL_SCHEMA: &str = include_str!("../schemas/personal.toml");

/// Every form field the wizard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    BusinessName,
    Industry,
    PrimaryGoal,
    Tagline,
    Description,
    ContactEmail,
    SiteName,
    Bio,
    Cta,
    Email,
    Instagram,
    Linkedin,
}

impl FieldKey {
    pub fn all() -> &'static [FieldKey] {
        &[
            FieldKey::BusinessName,
            FieldKey::Industry,
            FieldKey::PrimaryGoal,
            FieldKey::Tagline,
            FieldKey::Description,
            FieldKey::ContactEmail,
            FieldKey::SiteName,
            FieldKey::Bio,
            FieldKey::Cta,
            FieldKey::Email,
            FieldKey::Instagram,
            FieldKey::Linkedin,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            FieldKey::BusinessName => "business_name",
            FieldKey::Industry => "industry",
            FieldKey::PrimaryGoal => "primary_goal",
            FieldKey::Tagline => "tagline",
            FieldKey::Description => "description",
            FieldKey::ContactEmail => "contact_email",
            FieldKey::SiteName => "site_name",
            FieldKey::Bio => "bio",
            FieldKey::Cta => "cta",
            FieldKey::Email => "email",
            FieldKey::Instagram => "instagram",
            FieldKey::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FieldKey {
    type Err = WizardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldKey::all()
            .iter()
            .copied()
            .find(|key| key.id() == s.trim())
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}

/// How a single field is checked before the wizard may move forward.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRule {
    /// Collected for the preview only; never blocks.
    #[default]
    Optional,
    /// Non-empty after trimming.
    Required,
    /// Non-empty and one of the listed option values.
    OneOf { options: Vec<String> },
    /// Non-empty and shaped like `local@domain.tld`.
    Email,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: String,

    #[serde(default)]
    pub rule: FieldRule,

    /// Message shown when the field blocks a step change.
    #[serde(default)]
    pub message: Option<String>,

    /// Message shown when the field blocks final submission.
    #[serde(default)]
    pub submit_message: Option<String>,

    /// Multi-line input (Enter inserts a newline instead of advancing).
    #[serde(default)]
    pub multiline: bool,
}

impl FieldSpec {
    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("Please enter your {}", self.label.to_lowercase()))
    }

    pub fn submit_message(&self) -> String {
        self.submit_message
            .clone()
            .unwrap_or_else(|| self.message())
    }

    pub fn is_gating(&self) -> bool {
        !matches!(self.rule, FieldRule::Optional)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepSchema {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl StepSchema {
    pub fn is_gating(&self) -> bool {
        self.fields.iter().any(FieldSpec::is_gating)
    }
}

/// Which indicator steps a user may jump to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpPolicy {
    /// Only steps behind the current one (already completed).
    #[default]
    CompletedOnly,
    /// Any step, forward or backward.
    Any,
}

/// Maps variant fields onto the roles the preview understands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewRoles {
    #[serde(default)]
    pub name: Option<FieldKey>,
    #[serde(default)]
    pub tagline: Option<FieldKey>,
    #[serde(default)]
    pub body: Option<FieldKey>,
    #[serde(default)]
    pub cta: Option<FieldKey>,
    #[serde(default)]
    pub email: Option<FieldKey>,
    #[serde(default)]
    pub instagram: Option<FieldKey>,
    #[serde(default)]
    pub linkedin: Option<FieldKey>,
    #[serde(default)]
    pub show_image: bool,
}

impl PreviewRoles {
    fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        [
            self.name,
            self.tagline,
            self.body,
            self.cta,
            self.email,
            self.instagram,
            self.linkedin,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardSchema {
    pub name: String,

    #[serde(default)]
    pub jump_policy: JumpPolicy,

    #[serde(default)]
    pub preview: PreviewRoles,

    pub steps: Vec<StepSchema>,
}

impl WizardSchema {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// 1-based step lookup.
    pub fn step(&self, step: usize) -> Option<&StepSchema> {
        step.checked_sub(1).and_then(|idx| self.steps.get(idx))
    }

    pub fn field(&self, key: FieldKey) -> Option<&FieldSpec> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .find(|spec| spec.key == key)
    }

    /// Step number holding `key`.
    pub fn step_of(&self, key: FieldKey) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| step.fields.iter().any(|spec| spec.key == key))
            .map(|idx| idx + 1)
    }

    /// All field keys in declaration order.
    pub fn keys(&self) -> Vec<FieldKey> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter().map(|spec| spec.key))
            .collect()
    }

    /// 1-based numbers of steps that have at least one blocking field.
    pub fn gating_steps(&self) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.is_gating())
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WizardError::Schema("schema name must not be empty".into()).into());
        }
        if self.steps.is_empty() {
            return Err(
                WizardError::Schema(format!("schema {} must declare steps", self.name)).into(),
            );
        }

        let mut seen = HashSet::new();
        for (idx, step) in self.steps.iter().enumerate() {
            for spec in &step.fields {
                if !seen.insert(spec.key) {
                    return Err(WizardError::Schema(format!(
                        "field {} declared twice (step {})",
                        spec.key,
                        idx + 1
                    ))
                    .into());
                }
                if let FieldRule::OneOf { options } = &spec.rule {
                    if options.iter().all(|opt| opt.trim().is_empty()) {
                        return Err(WizardError::Schema(format!(
                            "field {} uses one_of without options",
                            spec.key
                        ))
                        .into());
                    }
                }
            }
        }

        for key in self.preview.keys() {
            if !seen.contains(&key) {
                return Err(anyhow!(
                    "schema {}: preview refers to undeclared field {}",
                    self.name,
                    key
                ));
            }
        }

        Ok(())
    }
}

pub fn parse_schema_toml(toml_str: &str) -> Result<WizardSchema> {
    let schema: WizardSchema = toml::from_str(toml_str).context("failed to parse wizard schema")?;
    schema.validate()?;
    Ok(schema)
}

/// Built-in wizard variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Three-step business onboarding with step indicator (canonical)
    #[default]
    Business,
    /// Four-step personal site builder with image upload
    Personal,
}

impl Variant {
    pub fn schema(&self) -> Result<WizardSchema> {
        let source = match self {
            Variant::Business => BUSINESS_SCHEMA,
            Variant::Personal => PERSONAL_SCHEMA,
        };
        parse_schema_toml(source).with_context(|| format!("bundled {} schema", self))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Business => write!(f, "business"),
            Variant::Personal => write!(f, "personal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_schemas_parse() {
        let business = Variant::Business.schema().unwrap();
        assert_eq!(business.total_steps(), 3);
        assert_eq!(business.jump_policy, JumpPolicy::CompletedOnly);
        assert_eq!(
            business.steps[0]
                .fields
                .iter()
                .map(|f| f.key)
                .collect::<Vec<_>>(),
            vec![
                FieldKey::BusinessName,
                FieldKey::Industry,
                FieldKey::PrimaryGoal
            ]
        );

        let personal = Variant::Personal.schema().unwrap();
        assert_eq!(personal.total_steps(), 4);
        assert_eq!(personal.jump_policy, JumpPolicy::Any);
        assert!(personal.preview.show_image);
        assert_eq!(personal.gating_steps(), vec![2, 4]);
    }

    #[test]
    fn field_key_roundtrips_through_id() {
        for key in FieldKey::all() {
            assert_eq!(key.id().parse::<FieldKey>().unwrap(), *key);
        }
        assert!("favourite_colour".parse::<FieldKey>().is_err());
    }

    #[test]
    fn default_messages_derive_from_label() {
        let spec = FieldSpec {
            key: FieldKey::Industry,
            label: "Industry".to_string(),
            rule: FieldRule::Required,
            message: None,
            submit_message: None,
            multiline: false,
        };
        assert_eq!(spec.message(), "Please enter your industry");
        assert_eq!(spec.submit_message(), "Please enter your industry");
    }

    #[test]
    fn rejects_duplicate_fields() {
        let doc = r#"
name = "dup"

[[steps]]
title = "One"

  [[steps.fields]]
  key = "bio"
  label = "Bio"

[[steps]]
title = "Two"

  [[steps.fields]]
  key = "bio"
  label = "Bio again"
"#;
        let err = parse_schema_toml(doc).unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn rejects_preview_role_for_undeclared_field() {
        let doc = r#"
name = "orphan"

[preview]
name = "site_name"

[[steps]]
title = "Only"

  [[steps.fields]]
  key = "bio"
  label = "Bio"
"#;
        assert!(parse_schema_toml(doc).is_err());
    }

    #[test]
    fn rejects_empty_one_of() {
        let doc = r#"
name = "goals"

[[steps]]
title = "Only"

  [[steps.fields]]
  key = "primary_goal"
  label = "Primary goal"
  rule = { kind = "one_of", options = [] }
"#;
        assert!(parse_schema_toml(doc).is_err());
    }

    #[test]
    fn step_lookup_is_one_based() {
        let schema = Variant::Business.schema().unwrap();
        assert!(schema.step(0).is_none());
        assert_eq!(schema.step(1).unwrap().title, "Tell Us About Your Business");
        assert!(schema.step(4).is_none());
        assert_eq!(schema.step_of(FieldKey::ContactEmail), Some(3));
    }
}
