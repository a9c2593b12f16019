//! pwrstat Status Record
//!
//! [`StatusRecord`] is the flat field-name-to-value mapping built from one
//! `pwrstat -status` report. Values keep their unit suffixes ("100 %", "35 min");
//! stripping units is left to the metric translation rules.
//!
//! Serialized form matches what operators get from `--once`:
//!
//! ```json
//! {"status": {"Battery Capacity": "100 %", "Model Name": "CP1000PFCLCDa"}}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field carrying the UPS model, used as the `device` label
pub const MODEL_NAME_FIELD: &str = "Model Name";

/// Parsed pwrstat report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    status: BTreeMap<String, String>,
}

impl StatusRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any earlier value for the same name
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.status.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.status.get(field).map(String::as_str)
    }

    pub fn model_name(&self) -> Option<&str> {
        self.get(MODEL_NAME_FIELD)
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.status.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pretty-printed JSON rendering of the record
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StatusRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}
