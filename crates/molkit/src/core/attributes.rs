//! Open-ended string-keyed property bags for atoms, bonds, and molecules.
//!
//! Format plugins stash format-specific metadata here (for example a PDB
//! residue name) without extending the core schema. By convention keys are
//! namespaced as `"plugin_name/attribute"`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A value stored in an attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

impl AttrValue {
    /// Returns the text content if this value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, widening integers to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

/// The property bag carried by every atom, bond, and molecule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    entries: HashMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves the value stored under `key`, if any.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Removes and returns the value stored under `key`.
    pub fn del_attr(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
