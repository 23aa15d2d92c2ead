//! Header text rendering in the `default` (block) and `single` (bracketed) styles.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::config::{Config, ShebangKind, Template};
use crate::error::Result;
use crate::field::HeaderField;
use crate::i18n::{Language, TranslationCatalog};
use crate::profile::LanguageProfile;
use crate::version::INITIAL_VERSION;

/// Format of the Creation Date and Last edited on values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker that opens an interpreter line.
pub const SHEBANG_MARKER: &str = "#!";

/// Times the comment token repeats to form a block separator line.
pub const SEPARATOR_REPEAT: usize = 15;

pub fn format_timestamp(now: &NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Values for every header field, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    values: [(HeaderField, String); 6],
}

impl FieldValues {
    /// Values for a brand-new header: version 1.0.0, created and edited `now`.
    pub fn initial(config: &Config, now: &NaiveDateTime) -> Self {
        let timestamp = format_timestamp(now);
        Self {
            values: [
                (HeaderField::Author, config.author.clone()),
                (HeaderField::CreationDate, timestamp.clone()),
                (HeaderField::Description, config.description.clone()),
                (HeaderField::Version, INITIAL_VERSION.to_string()),
                (HeaderField::LastEditedBy, config.author.clone()),
                (HeaderField::LastEditedOn, timestamp),
            ],
        }
    }

    fn iter(&self) -> impl Iterator<Item = (HeaderField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

/// Renders header blocks with localized labels.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRenderer<'a> {
    catalog: &'a TranslationCatalog,
}

impl<'a> HeaderRenderer<'a> {
    pub fn new(catalog: &'a TranslationCatalog) -> Self {
        Self { catalog }
    }

    /// Render a fresh header for `config` (no shebang line).
    pub fn render(
        &self,
        config: &Config,
        profile: &LanguageProfile,
        now: &NaiveDateTime,
    ) -> Result<String> {
        let values = FieldValues::initial(config, now);
        self.render_values(
            config.comment_token(profile),
            config.template,
            config.language,
            &values,
        )
    }

    /// Render arbitrary field values in the given style.
    pub fn render_values(
        &self,
        comment: &str,
        template: Template,
        language: Language,
        values: &FieldValues,
    ) -> Result<String> {
        let mut out = String::new();
        match template {
            Template::Default => {
                let separator = comment.repeat(SEPARATOR_REPEAT);
                let _ = writeln!(out, "{separator}");
                for (field, value) in values.iter() {
                    let label = self.catalog.label(field, language)?;
                    let _ = writeln!(out, "{comment}    {label}: {value}");
                    if field == HeaderField::Description {
                        let _ = writeln!(out, "{separator}");
                    }
                }
                let _ = writeln!(out, "{separator}");
                out.push('\n');
            }
            Template::Single => {
                for (field, value) in values.iter() {
                    let label = self.catalog.label(field, language)?;
                    let _ = writeln!(out, "{comment} [{label}: {value}]");
                }
            }
        }
        Ok(out)
    }

    /// The interpreter line to write before the header, if any.
    ///
    /// None when the shebang kind is `none`, when the profile has no shebang,
    /// or when the target already starts with one.
    pub fn shebang<'p>(
        config: &Config,
        profile: &'p LanguageProfile,
        existing_first_line: Option<&str>,
    ) -> Option<&'p str> {
        if config.shebang == ShebangKind::None || !profile.has_shebang() {
            return None;
        }
        if existing_first_line.is_some_and(|line| line.starts_with(SHEBANG_MARKER)) {
            return None;
        }
        Some(profile.shebang_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LanguageProfileTable;
    use chrono::NaiveDate;
    use std::path::Path;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    fn config(template: Template, language: Language) -> Config {
        Config {
            author: "alice".to_string(),
            language,
            comment: None,
            shebang: ShebangKind::Auto,
            template,
            description: String::new(),
        }
    }

    fn generic() -> &'static LanguageProfile {
        LanguageProfileTable::get().generic()
    }

    fn renderer() -> HeaderRenderer<'static> {
        HeaderRenderer::new(TranslationCatalog::get())
    }

    #[test]
    fn test_block_style_is_bit_exact() {
        let text = renderer()
            .render(&config(Template::Default, Language::ENGLISH), generic(), &now())
            .unwrap();

        let expected = "###############\n\
#    Author: alice\n\
#    Creation Date: 2024-03-09 14:05:00\n\
#    Description: \n\
###############\n\
#    Version: 1.0.0\n\
#    Last edited by: alice\n\
#    Last edited on: 2024-03-09 14:05:00\n\
###############\n\
\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_single_style_is_bit_exact() {
        let text = renderer()
            .render(&config(Template::Single, Language::ENGLISH), generic(), &now())
            .unwrap();

        let expected = "# [Author: alice]\n\
# [Creation Date: 2024-03-09 14:05:00]\n\
# [Description: ]\n\
# [Version: 1.0.0]\n\
# [Last edited by: alice]\n\
# [Last edited on: 2024-03-09 14:05:00]\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_separator_repeats_multi_char_token() {
        let rust = LanguageProfileTable::get().for_path(Path::new("lib.rs"));
        let text = renderer()
            .render(&config(Template::Default, Language::ENGLISH), rust, &now())
            .unwrap();
        assert!(text.starts_with(&format!("{}\n", "/".repeat(30))));
        assert!(text.contains("//    Version: 1.0.0\n"));
    }

    #[test]
    fn test_field_count_and_order_for_every_language() {
        let catalog = TranslationCatalog::get();
        for language in Language::all() {
            for template in [Template::Default, Template::Single] {
                let text = renderer()
                    .render(&config(template, language), generic(), &now())
                    .unwrap();
                let labels: Vec<_> = HeaderField::ALL
                    .iter()
                    .map(|field| catalog.label(*field, language).unwrap())
                    .collect();

                let positions: Vec<_> = labels
                    .iter()
                    .map(|label| text.find(&format!("{label}: ")).expect("label rendered"))
                    .collect();
                let mut sorted = positions.clone();
                sorted.sort_unstable();
                assert_eq!(positions, sorted, "{language} {template:?}");

                let version_label = catalog.label(HeaderField::Version, language).unwrap();
                assert!(text.contains(&format!("{version_label}: 1.0.0")));
            }
        }
    }

    #[test]
    fn test_description_is_rendered() {
        let mut config = config(Template::Single, Language::GERMAN);
        config.description = "Parst Logdateien".to_string();
        let text = renderer().render(&config, generic(), &now()).unwrap();
        assert!(text.contains("# [Beschreibung: Parst Logdateien]\n"));
    }

    #[test]
    fn test_explicit_comment_wins_over_profile() {
        let mut config = config(Template::Single, Language::ENGLISH);
        config.comment = Some(";".to_string());
        let python = LanguageProfileTable::get().for_path(Path::new("x.py"));
        let text = renderer().render(&config, python, &now()).unwrap();
        assert!(text.starts_with("; [Author: alice]\n"));
    }

    // ==================== Shebang Tests ====================

    #[test]
    fn test_shebang_for_python() {
        let python = LanguageProfileTable::get().for_path(Path::new("x.py"));
        let config = config(Template::Default, Language::ENGLISH);
        assert_eq!(
            HeaderRenderer::shebang(&config, python, None),
            Some("#!/usr/bin/env python3")
        );
    }

    #[test]
    fn test_no_double_shebang() {
        let python = LanguageProfileTable::get().for_path(Path::new("x.py"));
        let config = config(Template::Default, Language::ENGLISH);
        assert_eq!(HeaderRenderer::shebang(&config, python, Some("#!/usr/bin/python")), None);
        assert!(HeaderRenderer::shebang(&config, python, Some("import os")).is_some());
    }

    #[test]
    fn test_shebang_none_and_profile_without_shebang() {
        let python = LanguageProfileTable::get().for_path(Path::new("x.py"));
        let mut config = config(Template::Default, Language::ENGLISH);
        assert_eq!(HeaderRenderer::shebang(&config, generic(), None), None);

        config.shebang = ShebangKind::None;
        assert_eq!(HeaderRenderer::shebang(&config, python, None), None);
    }
}
