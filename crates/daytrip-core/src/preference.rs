//! The user's free-text activity preference.

use crate::error::{DaytripError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-empty, user-supplied description of what they feel like doing.
///
/// The text is kept as typed; only the emptiness check looks at the trimmed
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Preference(String);

impl Preference {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DaytripError::EmptyPreference);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Preference {
    type Error = DaytripError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Preference> for String {
    fn from(value: Preference) -> Self {
        value.0
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
