// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! API records kept as opaque JSON.
//!
//! ```text
//! Repository(Value)  full_name, clone_url, private   --> repository-info.json
//! Issue(Value)       number, url, comments_url       --> issues/<n>.json
//! comments           Vec<Value>                      --> issues/<n>.comments.json
//! ```
//!
//! Only the fields the backup needs are read; everything else passes
//! through untouched when the record is written back to disk.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecordError;

/// A repository document from the repository listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository(Value);

impl Repository {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The full record as returned by the API.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// `owner/name` identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the field is absent or not a string.
    pub fn full_name(&self) -> Result<&str, RecordError> {
        str_field(&self.0, "repository", "full_name")
    }

    /// Transport URL used for the mirror clone.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the field is absent or not a string.
    pub fn clone_url(&self) -> Result<&str, RecordError> {
        str_field(&self.0, "repository", "clone_url")
    }

    /// Visibility flag.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the field is absent or not a bool.
    pub fn is_private(&self) -> Result<bool, RecordError> {
        self.0
            .get("private")
            .and_then(Value::as_bool)
            .ok_or(RecordError::MissingField {
                kind: "repository",
                field: "private",
            })
    }

    /// Splits `full_name` into its owner and repository name.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidFullName` unless the name has exactly one
    /// `/` and both halves are usable as a single path component.
    pub fn owner_and_name(&self) -> Result<(&str, &str), RecordError> {
        let full_name = self.full_name()?;
        split_full_name(full_name)
            .ok_or_else(|| RecordError::InvalidFullName(full_name.to_string()))
    }
}

/// An issue document from the issue listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issue(Value);

impl Issue {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Issue number, unique within the repository.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the field is absent or not an integer.
    pub fn number(&self) -> Result<u64, RecordError> {
        self.0
            .get("number")
            .and_then(Value::as_u64)
            .ok_or(RecordError::MissingField {
                kind: "issue",
                field: "number",
            })
    }

    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the field is absent or not a string.
    pub fn url(&self) -> Result<&str, RecordError> {
        str_field(&self.0, "issue", "url")
    }

    /// First page of the issue's comment thread.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if the field is absent or not a string.
    pub fn comments_url(&self) -> Result<&str, RecordError> {
        str_field(&self.0, "issue", "comments_url")
    }
}

fn str_field<'a>(
    value: &'a Value,
    kind: &'static str,
    field: &'static str,
) -> Result<&'a str, RecordError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingField { kind, field })
}

fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let (owner, name) = full_name.split_once('/')?;
    (is_safe_component(owner) && is_safe_component(name)).then_some((owner, name))
}

fn is_safe_component(part: &str) -> bool {
    !part.is_empty()
        && part != "."
        && part != ".."
        && !part.contains(['/', '\\', '\0'])
}
