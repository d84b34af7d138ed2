use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The three languages the studio publishes in.
///
/// English is the default language and the first fallback for any missing
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
    Tr,
}

impl Language {
    /// Two-letter lowercase code (`"en"`, `"ar"`, `"tr"`).
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
            Language::Tr => "tr",
        }
    }

    /// Parse a language code. Unknown codes fall back to English so that a
    /// bad `?lang=` query parameter can never fail a request.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "ar" => Language::Ar,
            "tr" => Language::Tr,
            _ => Language::En,
        }
    }

    /// English name of the language, used when prompting the narrative
    /// generator ("write in Arabic").
    pub fn english_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "Arabic",
            Language::Tr => "Turkish",
        }
    }

    /// Whether the language is written right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
