//! Committed form values.
//!
//! The snapshot holds what the wizard last *saved*, not live keystrokes. It
//! is written on a successful step change, an explicit save, an accepted
//! upload (image only) or a reset.

use crate::schema::FieldKey;
use crate::upload::ImageData;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Read-only view of field values, keyed by [`FieldKey`].
pub trait FieldValues {
    /// Current value of `key`, empty when unset.
    fn field_value(&self, key: FieldKey) -> String;
}

impl FieldValues for BTreeMap<FieldKey, String> {
    fn field_value(&self, key: FieldKey) -> String {
        self.get(&key).cloned().unwrap_or_default()
    }
}

impl FieldValues for HashMap<FieldKey, String> {
    fn field_value(&self, key: FieldKey) -> String {
        self.get(&key).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    values: BTreeMap<FieldKey, String>,
    image: Option<ImageData>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Copy `keys` from a live source into the snapshot.
    pub fn commit_from<V>(&mut self, keys: &[FieldKey], live: &V)
    where
        V: FieldValues + ?Sized,
    {
        for key in keys {
            self.values.insert(*key, live.field_value(*key));
        }
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: ImageData) {
        self.image = Some(image);
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.image = None;
    }

    pub fn values(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

impl FieldValues for FormSnapshot {
    fn field_value(&self, key: FieldKey) -> String {
        self.get(key).to_string()
    }
}

/// Parse an answers file (`field_id = "value"` pairs) into a snapshot.
pub fn parse_answers_toml(toml_str: &str) -> Result<FormSnapshot> {
    let raw: BTreeMap<String, String> =
        toml::from_str(toml_str).context("failed to parse answers file")?;
    let mut snapshot = FormSnapshot::new();
    for (id, value) in raw {
        let key: FieldKey = id.parse()?;
        snapshot.set(key, value);
    }
    Ok(snapshot)
}
