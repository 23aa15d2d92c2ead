//! Internationalization (i18n) module for localized header labels.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe, registry-validated `Language` code
//! - `catalog`: `(HeaderField, Language)` → label lookup, verified complete at startup
//!
//! # Example
//!
//! ```rust
//! use file_header::i18n::{Language, TranslationCatalog};
//! use file_header::HeaderField;
//!
//! let french = Language::from_code("fr").unwrap();
//! let label = TranslationCatalog::get().label(HeaderField::Author, french).unwrap();
//! assert_eq!(label, "Auteur");
//! ```

mod catalog;
mod language;
mod registry;

pub use catalog::TranslationCatalog;
pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
