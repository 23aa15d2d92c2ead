//! The human languages header labels can be rendered in.
//!
//! The table is fixed at compile time; `LanguageRegistry::get` hands out the
//! process-wide view of it.

use std::sync::OnceLock;

/// One supported label language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// ISO 639-1 code, as accepted by `-l` and `Language=`
    pub code: &'static str,

    /// Used when neither options, config file nor locale pick a language
    pub is_canonical: bool,

    pub enabled: bool,
}

const LANGUAGES: &[LanguageConfig] = &[
    LanguageConfig { code: "fr", is_canonical: false, enabled: true },
    LanguageConfig { code: "en", is_canonical: true, enabled: true },
    LanguageConfig { code: "de", is_canonical: false, enabled: true },
    LanguageConfig { code: "es", is_canonical: false, enabled: true },
    LanguageConfig { code: "it", is_canonical: false, enabled: true },
];

/// Lookup over the language table.
pub struct LanguageRegistry {
    languages: &'static [LanguageConfig],
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: LANGUAGES,
        })
    }

    pub fn get_by_code(&self, code: &str) -> Option<&'static LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Enabled languages, in table order.
    pub fn list_enabled(&self) -> Vec<&'static LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// The fallback language.
    ///
    /// # Panics
    /// Panics unless exactly one entry is canonical.
    pub fn canonical(&self) -> &'static LanguageConfig {
        let mut canonical = self.languages.iter().filter(|lang| lang.is_canonical);
        match (canonical.next(), canonical.next()) {
            (Some(config), None) => config,
            (None, _) => panic!("No canonical language found in registry"),
            (Some(_), Some(_)) => panic!("Multiple canonical languages found in registry"),
        }
    }
}
