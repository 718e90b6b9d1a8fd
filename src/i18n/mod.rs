// src/i18n/mod.rs
//! UI message catalog.
//!
//! Built once at startup and handed to whatever renders, rather than read
//! from global state. Lookups fall back to the default locale and then to
//! the key itself, so a missing translation never panics.

use crate::types::{Locale, ValidationError};
use indexmap::IndexMap;
use std::str::FromStr;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

type Messages = IndexMap<String, String>;

/// Immutable `Locale -> key -> message` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: IndexMap<Locale, Messages>,
}

impl MessageCatalog {
    /// The site's English and Spanish strings.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("Built-in message catalog should be valid")
    }

    /// Parses `{"en": {"key": "message"}, "es": {...}}`.
    ///
    /// Unknown locale codes are rejected; the default locale must be present.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let raw: IndexMap<String, Messages> = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidCatalog(e.to_string()))?;

        let mut messages = IndexMap::with_capacity(raw.len());
        for (code, table) in raw {
            let locale = Locale::from_str(&code)?;
            messages.insert(locale, table);
        }

        if !messages.contains_key(&Locale::default()) {
            return Err(ValidationError::InvalidCatalog(format!(
                "missing default locale '{}'",
                Locale::default()
            )));
        }

        Ok(Self { messages })
    }

    /// Message for `key` in `locale`.
    pub fn t<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::default(), key))
            .unwrap_or(key)
    }

    /// Like [`t`](Self::t), replacing each `{name}` placeholder.
    pub fn t_with(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.t(locale, key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }

    /// Locales with at least one message, in catalog order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.messages.keys().copied()
    }

    /// Keys of the default locale missing from `locale`.
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        let Some(reference) = self.messages.get(&Locale::default()) else {
            return Vec::new();
        };
        let target = self.messages.get(&locale);
        reference
            .keys()
            .filter(|key| target.map_or(true, |table| !table.contains_key(*key)))
            .map(String::as_str)
            .collect()
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.messages
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

/// Display name of a locale in its own language.
pub fn language_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Es => "Español",
    }
}
