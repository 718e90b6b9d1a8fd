// src/types/locale.rs
use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// Two-letter code used in paths and catalog keys.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// BCP-47 tag used for date and number formatting.
    pub fn language_tag(&self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Es => "es-MX",
        }
    }

    /// Path prefix under which this locale's pages live (`""` or `"/es"`).
    pub fn path_prefix(&self) -> &'static str {
        match self {
            Self::En => "",
            Self::Es => "/es",
        }
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Self::En),
            "es" | "es-mx" | "es-us" => Ok(Self::Es),
            other => Err(ValidationError::UnsupportedLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
