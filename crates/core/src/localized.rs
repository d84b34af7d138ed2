//! Per-language text values and the fallback chain that resolves them.
//!
//! Every logical text field (a project title, a paragraph of the studio
//! bio) is stored as one [`Localized`] value holding the English, Arabic
//! and Turkish translations side by side. Older documents store a bare
//! string for the same field; that shape is accepted on input and kept as
//! the final fallback so legacy content keeps rendering.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// A text value with one slot per supported language plus a legacy plain
/// slot for documents written before fields were translated.
///
/// Resolution never fails: [`resolve`](Self::resolve) degrades through the
/// fallback chain (requested language, then English, then the plain value)
/// and bottoms out at the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localized {
    pub en: String,
    pub ar: String,
    pub tr: String,
    plain: String,
}

impl Localized {
    /// Build a value with all three translations.
    pub fn new(en: impl Into<String>, ar: impl Into<String>, tr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
            tr: tr.into(),
            plain: String::new(),
        }
    }

    /// Build a value with only the English translation.
    pub fn english(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ..Self::default()
        }
    }

    /// Build a legacy untranslated value (a bare string in the document).
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            plain: value.into(),
            ..Self::default()
        }
    }

    /// The exact value stored for `lang`, possibly empty.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Ar => &self.ar,
            Language::Tr => &self.tr,
        }
    }

    /// Resolve the value to display for `lang`.
    ///
    /// Order: the requested language when non-empty, then English, then
    /// the legacy plain value, then `""`. A missing translation therefore
    /// shows possibly-wrong-language text or a blank, never an error.
    pub fn resolve(&self, lang: Language) -> &str {
        let exact = self.get(lang);
        if !exact.is_empty() {
            return exact;
        }
        if !self.en.is_empty() {
            return &self.en;
        }
        if !self.plain.is_empty() {
            return &self.plain;
        }
        ""
    }

    /// True when no slot holds any text.
    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ar.is_empty() && self.tr.is_empty() && self.plain.is_empty()
    }
}

impl From<&str> for Localized {
    fn from(value: &str) -> Self {
        Localized::plain(value)
    }
}

// ---------------------------------------------------------------------------
// Serde representation
// ---------------------------------------------------------------------------

/// Wire shape: either a bare string (legacy documents) or a per-language
/// map. `#[serde(untagged)]` tries the variants in order.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LocalizedRepr {
    Plain(String),
    PerLanguage {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        en: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        ar: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        tr: String,
    },
}

impl Serialize for Localized {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A value that only ever held a legacy string round-trips as one;
        // anything translated is written as the per-language map.
        let repr = if self.en.is_empty() && self.ar.is_empty() && self.tr.is_empty() {
            LocalizedRepr::Plain(self.plain.clone())
        } else {
            LocalizedRepr::PerLanguage {
                en: self.en.clone(),
                ar: self.ar.clone(),
                tr: self.tr.clone(),
            }
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Localized {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match LocalizedRepr::deserialize(deserializer)? {
            LocalizedRepr::Plain(value) => Localized::plain(value),
            LocalizedRepr::PerLanguage { en, ar, tr } => Localized {
                en,
                ar,
                tr,
                plain: String::new(),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
