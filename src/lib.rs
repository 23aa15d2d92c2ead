//! Localized provenance headers for arbitrary source files.
//!
//! A header records author, creation date, description, version and last edit,
//! written in the target file's comment syntax and in one of five languages.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use file_header::{
//!     config::{resolve, Defaults, Overrides},
//!     i18n::TranslationCatalog,
//!     identity::SystemIdentity,
//!     mutator::HeaderMutator,
//!     profile::LanguageProfileTable,
//! };
//!
//! fn main() -> file_header::Result<()> {
//!     let defaults = Defaults::from_env(&SystemIdentity);
//!     let config = resolve(&defaults, None, &Overrides::default(), None)?;
//!     let now = chrono::Local::now().naive_local();
//!
//!     HeaderMutator::new(&config, TranslationCatalog::get(), LanguageProfileTable::get(), now)
//!         .apply(Path::new("script.py"), None)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod header;
pub mod i18n;
pub mod identity;
pub mod mutator;
pub mod profile;
pub mod prompt;
pub mod render;
pub mod version;

pub use config::{Config, ShebangKind, Template};
pub use error::{HeaderError, Result};
pub use field::HeaderField;
pub use mutator::{HeaderMutator, Mode};
pub use version::{UpdateDirective, Version};
