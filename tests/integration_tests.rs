//! Integration tests for the header engine
//!
//! These tests drive the full path a CLI invocation takes: config file
//! loading, resolution with overrides, profile detection, rendering and
//! committing to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serial_test::serial;
use tempfile::TempDir;

use file_header::config::{resolve, ConfigFile, Defaults, Overrides, CONFIG_FILE_NAME};
use file_header::i18n::{Language, TranslationCatalog};
use file_header::identity::StaticIdentity;
use file_header::profile::LanguageProfileTable;
use file_header::version::extract_version;
use file_header::{Config, HeaderError, HeaderMutator, Mode, UpdateDirective, Version};

// ==================== Test Helpers ====================

fn created_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

fn edited_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(19, 45, 12)
        .unwrap()
}

fn defaults() -> Defaults {
    Defaults::new(&StaticIdentity("os-user".to_string()), None)
}

/// Resolve a config the way the binary does, reading `.header_config` from `dir`.
fn config_in(dir: &Path, overrides: Overrides) -> file_header::Result<Config> {
    let file = ConfigFile::load(&dir.join(CONFIG_FILE_NAME))?;
    resolve(&defaults(), file.as_ref(), &overrides, None)
}

fn apply(
    config: &Config,
    now: NaiveDateTime,
    path: &Path,
    update: Option<&UpdateDirective>,
) -> file_header::Result<Mode> {
    HeaderMutator::new(config, TranslationCatalog::get(), LanguageProfileTable::get(), now)
        .apply(path, update)
}

fn target(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ==================== Scenario Tests ====================

#[test]
fn test_config_file_scenario_report_py() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "Author=ConfigUser\nLanguage=fr\nTemplate=single\n",
    )
    .unwrap();
    let path = target(&dir, "report.py");

    let config = config_in(dir.path(), Overrides::default()).unwrap();
    let mode = apply(&config, created_at(), &path, None).unwrap();

    assert_eq!(mode, Mode::Create);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("#!/usr/bin/env python3\n"));
    assert!(text.contains("# [Auteur: ConfigUser]\n"));
    assert!(text.contains("# [Version: 1.0.0]\n"));
}

#[test]
fn test_update_major_scenario() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "service.sh");
    let creator = config_in(
        dir.path(),
        Overrides {
            author: Some("alice".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();
    apply(&creator, created_at(), &path, None).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let editor = config_in(
        dir.path(),
        Overrides {
            author: Some("bob".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();
    apply(&editor, edited_at(), &path, Some(&UpdateDirective::Major)).unwrap();
    let after = fs::read_to_string(&path).unwrap();

    assert!(after.contains("#    Version: 2.0.0\n"));
    assert!(after.contains("#    Last edited by: bob\n"));
    assert!(after.contains("#    Last edited on: 2025-06-02 19:45:12\n"));

    // Everything outside the three updated lines is identical
    let untouched = |text: &str| -> Vec<String> {
        text.lines()
            .filter(|line| !line.contains("Version:") && !line.contains("Last edited"))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(untouched(&before), untouched(&after));
    assert!(after.contains("#    Author: alice\n"));
    assert!(after.contains("#    Creation Date: 2025-01-15 08:30:00\n"));
}

// ==================== Version Policy Tests ====================

#[test]
fn test_update_policies_across_files() {
    let cases = [
        (UpdateDirective::Major, Version::new(2, 0, 0)),
        (UpdateDirective::Minor, Version::new(1, 1, 0)),
        (UpdateDirective::Patch, Version::new(1, 0, 1)),
        (UpdateDirective::Literal("3.5.7".to_string()), Version::new(3, 5, 7)),
    ];

    for (directive, expected) in cases {
        let dir = TempDir::new().unwrap();
        let path = target(&dir, "lib.go");
        let config = config_in(dir.path(), Overrides::default()).unwrap();
        apply(&config, created_at(), &path, None).unwrap();

        apply(&config, edited_at(), &path, Some(&directive)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let version = extract_version(&text, Language::ENGLISH, TranslationCatalog::get()).unwrap();
        assert_eq!(version, expected, "{directive:?}");
    }
}

#[test]
fn test_repeated_updates_accumulate() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "tool.rb");
    let config = config_in(dir.path(), Overrides::default()).unwrap();
    apply(&config, created_at(), &path, None).unwrap();

    for directive in [UpdateDirective::Patch, UpdateDirective::Patch, UpdateDirective::Minor] {
        apply(&config, edited_at(), &path, Some(&directive)).unwrap();
    }

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("#    Version: 1.1.0\n"));
}

#[test]
fn test_update_in_other_language_requires_matching_labels() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "main.c");
    let italian = config_in(
        dir.path(),
        Overrides {
            language: Some("it".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();
    apply(&italian, created_at(), &path, None).unwrap();

    let english = config_in(dir.path(), Overrides::default()).unwrap();
    let err = apply(&english, edited_at(), &path, Some(&UpdateDirective::Patch)).unwrap_err();
    assert!(matches!(err, HeaderError::NoVersionFound { .. }));

    apply(&italian, edited_at(), &path, Some(&UpdateDirective::Patch)).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("//    Versione: 1.0.1\n"));
    assert!(text.contains("//    Ultima modifica il: 2025-06-02 19:45:12\n"));
}

#[test]
fn test_update_touches_only_the_header_of_a_documented_module() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "pkg.py");
    let body = "\"\"\"Package docs.\n\nVersion: 0.9\nAuteur: someone\n\"\"\"\n# Version: 0.1\n";
    fs::write(&path, body).unwrap();
    let french = config_in(
        dir.path(),
        Overrides {
            language: Some("fr".to_string()),
            author: Some("dependabot[bot]".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();
    apply(&french, created_at(), &path, None).unwrap();

    let editor = Config {
        author: "alice".to_string(),
        ..french.clone()
    };
    let mode = apply(&editor, edited_at(), &path, Some(&UpdateDirective::Patch)).unwrap();

    assert_eq!(mode, Mode::Update);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("#    Version: 1.0.1\n"));
    assert!(text.contains("#    Auteur: dependabot[bot]\n"));
    assert!(text.contains("#    Dernière modification par: alice\n"));
    assert!(text.ends_with(body));
}

// ==================== Prepend Tests ====================

#[test]
fn test_prepend_is_non_destructive() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "module.ts");
    let original = "export const answer = 42;\n\n// trailing comment without newline";
    fs::write(&path, original).unwrap();

    let config = config_in(
        dir.path(),
        Overrides {
            shebang: Some("none".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();
    let mode = apply(&config, created_at(), &path, None).unwrap();

    assert_eq!(mode, Mode::Prepend);
    let text = fs::read_to_string(&path).unwrap();
    let header = file_header::render::HeaderRenderer::new(TranslationCatalog::get())
        .render(
            &config,
            LanguageProfileTable::get().for_path(&path),
            &created_at(),
        )
        .unwrap();
    assert_eq!(text, format!("{header}{original}"));
}

#[test]
fn test_prepend_preserves_non_utf8_content() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "blob.txt");
    let original: &[u8] = &[0xff, 0xfe, b'a', b'\n', 0x00, 0x80];
    fs::write(&path, original).unwrap();

    let config = config_in(dir.path(), Overrides::default()).unwrap();
    apply(&config, created_at(), &path, None).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.ends_with(original));
    assert!(bytes.starts_with(b"###############\n"));
}

// ==================== Validation Tests ====================

#[test]
fn test_invalid_language_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "never.py");

    let err = config_in(
        dir.path(),
        Overrides {
            language: Some("xyz".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Invalid language: 'xyz'");
    assert!(!path.exists());
}

#[test]
fn test_cli_override_beats_config_file_per_setting() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "Author=ConfigUser\nLanguage=fr\n",
    )
    .unwrap();
    let path = target(&dir, "notes.txt");

    let config = config_in(
        dir.path(),
        Overrides {
            author: Some("cli-user".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();
    apply(&config, created_at(), &path, None).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("#    Auteur: cli-user\n"));
    assert!(!text.contains("ConfigUser"));
}

#[test]
fn test_explicit_comment_overrides_profile() {
    let dir = TempDir::new().unwrap();
    let path = target(&dir, "script.py");
    let config = config_in(
        dir.path(),
        Overrides {
            comment: Some(";".to_string()),
            template: Some("single".to_string()),
            ..Overrides::default()
        },
    )
    .unwrap();

    apply(&config, created_at(), &path, None).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("#!/usr/bin/env python3\n; [Author: os-user]\n"));
}

// ==================== Environment Tests ====================

#[test]
#[serial]
fn test_locale_language_fallback() {
    let saved = std::env::var("LANG").ok();

    std::env::set_var("LANG", "it_IT.UTF-8");
    let italian = Defaults::from_env(&StaticIdentity("x".to_string()));
    std::env::remove_var("LANG");
    let fallback = Defaults::from_env(&StaticIdentity("x".to_string()));

    match saved {
        Some(value) => std::env::set_var("LANG", value),
        None => std::env::remove_var("LANG"),
    }

    assert_eq!(italian.language, Language::ITALIAN);
    assert_eq!(fallback.language, Language::ENGLISH);
}
