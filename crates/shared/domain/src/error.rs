//! Domain-level errors.
//!
//! Input-shape violations collected by the field validators. They are
//! independent of infrastructure concerns (HTTP, database).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Every rule violated by a request, grouped by field.
///
/// Fields iterate in name order; the messages of one field keep the order in
/// which the rules were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty set of violations
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the violations of one field. Empty lists are ignored.
    pub fn add(&mut self, field: impl Into<String>, violations: Vec<String>) {
        if violations.is_empty() {
            return;
        }
        self.fields.entry(field.into()).or_default().extend(violations);
    }

    /// True when no field has been rejected
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Violations of a single field (empty when the field passed)
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over rejected fields and their violations
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// `Ok(())` when nothing was rejected, otherwise the collected violations
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .fields
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        write!(f, "{}", messages.join(" | "))
    }
}

impl std::error::Error for ValidationErrors {}
