//! Language tags and their ISO 639-3 codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::{JuremyError, Result};

/// The 24 official EU languages, two-letter code to ISO 639-3
const EU_LANGUAGES: &[(&str, &str)] = &[
    ("hu", "hun"),
    ("en", "eng"),
    ("de", "deu"),
    ("fr", "fra"),
    ("es", "spa"),
    ("it", "ita"),
    ("nl", "nld"),
    ("pl", "pol"),
    ("pt", "por"),
    ("ro", "ron"),
    ("sk", "slk"),
    ("sl", "slv"),
    ("fi", "fin"),
    ("sv", "swe"),
    ("cs", "ces"),
    ("da", "dan"),
    ("et", "est"),
    ("lv", "lav"),
    ("lt", "lit"),
    ("mt", "mlt"),
    ("bg", "bul"),
    ("hr", "hrv"),
    ("el", "ell"),
    ("ga", "gle"),
];

/// A host language tag such as `en`, `en-US` or `pt_BR`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language {
    tag: String,
}

impl Language {
    /// Parse a language tag
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() || tag.starts_with(['-', '_']) {
            return Err(JuremyError::InvalidLanguageTag {
                tag: tag.to_string(),
            });
        }
        Ok(Self {
            tag: tag.to_string(),
        })
    }

    /// Primary language subtag, e.g. `en` for `en-US`
    pub fn language_code(&self) -> &str {
        self.tag
            .split(['-', '_'])
            .next()
            .unwrap_or(self.tag.as_str())
    }

    /// The full tag as given
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

impl FromStr for Language {
    type Err = JuremyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = JuremyError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.tag
    }
}

/// Map a language to the three-letter code Juremy searches with
pub fn to_iso639_3(lang: &Language) -> Result<&'static str> {
    let code = lang.language_code();
    EU_LANGUAGES
        .iter()
        .find(|(two, _)| two.eq_ignore_ascii_case(code))
        .map(|(_, three)| *three)
        .ok_or_else(|| JuremyError::LanguageNotSupported {
            code: code.to_string(),
        })
}

/// All supported languages as (two-letter, three-letter) pairs
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    EU_LANGUAGES
}
