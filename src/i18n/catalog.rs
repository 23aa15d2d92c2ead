//! Localized field labels, keyed by `(HeaderField, Language)`.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{HeaderError, Result};
use crate::field::HeaderField;
use crate::i18n::Language;

// ==================== Label Table ====================

const LABELS: &[(HeaderField, &str, &str)] = &[
    // English
    (HeaderField::Author, "en", "Author"),
    (HeaderField::CreationDate, "en", "Creation Date"),
    (HeaderField::Description, "en", "Description"),
    (HeaderField::Version, "en", "Version"),
    (HeaderField::LastEditedBy, "en", "Last edited by"),
    (HeaderField::LastEditedOn, "en", "Last edited on"),
    // French
    (HeaderField::Author, "fr", "Auteur"),
    (HeaderField::CreationDate, "fr", "Date de création"),
    (HeaderField::Description, "fr", "Description"),
    (HeaderField::Version, "fr", "Version"),
    (HeaderField::LastEditedBy, "fr", "Dernière modification par"),
    (HeaderField::LastEditedOn, "fr", "Dernière modification le"),
    // German
    (HeaderField::Author, "de", "Autor"),
    (HeaderField::CreationDate, "de", "Erstellungsdatum"),
    (HeaderField::Description, "de", "Beschreibung"),
    (HeaderField::Version, "de", "Version"),
    (HeaderField::LastEditedBy, "de", "Zuletzt bearbeitet von"),
    (HeaderField::LastEditedOn, "de", "Zuletzt bearbeitet am"),
    // Spanish
    (HeaderField::Author, "es", "Autor"),
    (HeaderField::CreationDate, "es", "Fecha de creación"),
    (HeaderField::Description, "es", "Descripción"),
    (HeaderField::Version, "es", "Versión"),
    (HeaderField::LastEditedBy, "es", "Última edición por"),
    (HeaderField::LastEditedOn, "es", "Última edición el"),
    // Italian
    (HeaderField::Author, "it", "Autore"),
    (HeaderField::CreationDate, "it", "Data di creazione"),
    (HeaderField::Description, "it", "Descrizione"),
    (HeaderField::Version, "it", "Versione"),
    (HeaderField::LastEditedBy, "it", "Ultima modifica di"),
    (HeaderField::LastEditedOn, "it", "Ultima modifica il"),
];

/// Immutable label lookup, verified complete at construction.
///
/// Each label also gets a compiled line pattern, used to find the field in a
/// rendered header once the comment token has been stripped off the line.
#[derive(Debug)]
pub struct TranslationCatalog {
    labels: HashMap<(HeaderField, Language), &'static str>,
    patterns: HashMap<(HeaderField, Language), Regex>,
}

/// `    <label>: <value>` (block) or ` [<label>: <value>]` (single).
///
/// The value runs to the end of the line, or to the last `]` in single style,
/// so values may themselves contain brackets.
fn line_pattern(label: &str) -> Regex {
    let label = regex::escape(label);
    let pattern = format!(
        r"^(?:[ \t]+{label}: (?P<block>.*)| \[{label}: (?P<single>.*)\])$"
    );
    Regex::new(&pattern).expect("escaped label always forms a valid pattern")
}

static CATALOG: OnceLock<TranslationCatalog> = OnceLock::new();

impl TranslationCatalog {
    /// Build the catalog from the built-in table and verify that every field
    /// has a label in every enabled language.
    pub fn new() -> Result<Self> {
        Self::from_entries(LABELS)
    }

    fn from_entries(entries: &[(HeaderField, &str, &'static str)]) -> Result<Self> {
        let mut labels = HashMap::with_capacity(entries.len());
        let mut patterns = HashMap::with_capacity(entries.len());
        for &(field, code, label) in entries {
            let language = Language::from_code(code)?;
            labels.insert((field, language), label);
            patterns.insert((field, language), line_pattern(label));
        }

        let catalog = Self { labels, patterns };
        catalog.verify_complete()?;
        Ok(catalog)
    }

    /// Process-wide catalog instance.
    ///
    /// # Panics
    /// Panics if the built-in table is incomplete, which the unit tests rule out.
    pub fn get() -> &'static TranslationCatalog {
        CATALOG.get_or_init(|| {
            TranslationCatalog::new().expect("built-in label table should be complete")
        })
    }

    /// Localized label for `field` in `language`.
    pub fn label(&self, field: HeaderField, language: Language) -> Result<&'static str> {
        self.labels
            .get(&(field, language))
            .copied()
            .ok_or(HeaderError::MissingTranslation {
                field: field.key(),
                language: language.code(),
            })
    }

    /// Compiled line pattern for `field` in `language`.
    ///
    /// Captures the value in group `block` or `single` depending on the style.
    pub fn line_pattern(&self, field: HeaderField, language: Language) -> Result<&Regex> {
        self.patterns
            .get(&(field, language))
            .ok_or(HeaderError::MissingTranslation {
                field: field.key(),
                language: language.code(),
            })
    }

    /// Check every (field, language) pair has an entry.
    pub fn verify_complete(&self) -> Result<()> {
        for language in Language::all() {
            for field in HeaderField::ALL {
                self.label(field, language)?;
            }
        }
        Ok(())
    }
}
