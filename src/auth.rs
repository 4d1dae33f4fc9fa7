// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! API credentials.
//!
//! ```text
//! GITHUB_USERNAME + GITHUB_TOKEN --> Credentials --> ApiClient (basic auth)
//! ```
//!
//! Only `main` reads the environment; everything below receives an explicit
//! [`Credentials`] value.

use std::fmt;

use crate::error::AuthError;

/// Environment variable holding the account name.
pub const USERNAME_VAR: &str = "GITHUB_USERNAME";
/// Environment variable holding the personal access token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Username and token used for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    token: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Reads both credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingVariable` naming the first unset or empty variable.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads both credentials through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingVariable` naming the first unset or empty variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AuthError::MissingVariable {
                    name: name.to_string(),
                })
        };
        Ok(Self::new(required(USERNAME_VAR)?, required(TOKEN_VAR)?))
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
