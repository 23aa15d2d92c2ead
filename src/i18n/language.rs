//! Language type: validated human-language code for header labels.

use crate::error::{HeaderError, Result};
use crate::i18n::LanguageRegistry;

/// A validated language.
///
/// Only supported, enabled languages from the registry can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "fr")
    code: &'static str,
}

impl Language {
    pub const FRENCH: Language = Language { code: "fr" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const GERMAN: Language = Language { code: "de" };
    pub const SPANISH: Language = Language { code: "es" };
    pub const ITALIAN: Language = Language { code: "it" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err(InvalidOption)` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            _ => Err(HeaderError::invalid("language", code)),
        }
    }

    /// Derive a language from a POSIX locale value such as `fr_FR.UTF-8`.
    ///
    /// Only the first two characters are considered; unsupported prefixes
    /// yield `None`.
    pub fn from_locale(locale: &str) -> Option<Language> {
        let prefix = locale.get(..2)?.to_ascii_lowercase();
        Language::from_code(&prefix).ok()
    }

    /// The fallback language (English).
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// All enabled languages, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}
