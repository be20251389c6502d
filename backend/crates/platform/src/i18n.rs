//! Localization
//!
//! Dictionaries are nested JSON objects flattened to dotted keys
//! (`{"common": {"signin": ".."}}` → `common.signin`).
//!
//! Lookup order: requested language, default language, then the key itself.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("ru", include_str!("../locales/ru.json")),
    ("am", include_str!("../locales/am.json")),
];

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("Invalid dictionary for '{lang}': {source}")]
    InvalidDictionary {
        lang: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dictionary for '{0}' must be a JSON object")]
    NotAnObject(String),
}

/// Translation lookup shared by every rendered page
#[derive(Debug, Clone, Default)]
pub struct Translator {
    default_lang: String,
    dictionaries: HashMap<String, HashMap<String, String>>,
}

impl Translator {
    pub fn new(default_lang: impl Into<String>) -> Self {
        Self {
            default_lang: default_lang.into(),
            dictionaries: HashMap::new(),
        }
    }

    /// Translator with the dictionaries shipped in the binary (`en`, `ru`, `am`)
    pub fn embedded(default_lang: impl Into<String>) -> Result<Self, I18nError> {
        EMBEDDED
            .iter()
            .try_fold(Self::new(default_lang), |translator, (lang, json)| {
                translator.with_json(lang, json)
            })
    }

    /// Add (or merge into) the dictionary for `lang`
    pub fn with_json(mut self, lang: &str, json: &str) -> Result<Self, I18nError> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| I18nError::InvalidDictionary {
                lang: lang.to_string(),
                source,
            })?;

        if !value.is_object() {
            return Err(I18nError::NotAnObject(lang.to_string()));
        }

        let entries = self.dictionaries.entry(lang.to_string()).or_default();
        flatten("", &value, entries);
        Ok(self)
    }

    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    pub fn has_lang(&self, lang: &str) -> bool {
        self.dictionaries.contains_key(lang)
    }

    /// Translate `key` for `lang`
    pub fn t(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(&self.default_lang, key))
            .map(str::to_string)
            .unwrap_or_else(|| {
                tracing::debug!(lang, key, "Missing translation");
                key.to_string()
            })
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.dictionaries
            .get(lang)
            .and_then(|dict| dict.get(key))
            .map(String::as_str)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
