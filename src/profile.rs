//! Language profiles: which shebang line and comment token a target file gets.

use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::config::ShebangKind;

/// Shebang and comment conventions for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Identifier (e.g. "python"), also accepted as an explicit shebang kind
    pub name: &'static str,
    /// Interpreter line; empty means the language has none
    pub shebang_line: &'static str,
    pub comment_token: &'static str,
}

impl LanguageProfile {
    pub fn has_shebang(&self) -> bool {
        !self.shebang_line.is_empty()
    }
}

pub const GENERIC: &str = "generic";

const PROFILES: &[LanguageProfile] = &[
    LanguageProfile { name: "bash", shebang_line: "#!/bin/bash", comment_token: "#" },
    LanguageProfile { name: "sh", shebang_line: "#!/bin/sh", comment_token: "#" },
    LanguageProfile { name: "zsh", shebang_line: "#!/bin/zsh", comment_token: "#" },
    LanguageProfile { name: "python", shebang_line: "#!/usr/bin/env python3", comment_token: "#" },
    LanguageProfile { name: "javascript", shebang_line: "#!/usr/bin/env node", comment_token: "//" },
    LanguageProfile { name: "node", shebang_line: "#!/usr/bin/env node", comment_token: "//" },
    LanguageProfile { name: "ruby", shebang_line: "#!/usr/bin/env ruby", comment_token: "#" },
    LanguageProfile { name: "perl", shebang_line: "#!/usr/bin/env perl", comment_token: "#" },
    LanguageProfile { name: "php", shebang_line: "#!/usr/bin/env php", comment_token: "//" },
    LanguageProfile { name: "c", shebang_line: "", comment_token: "//" },
    LanguageProfile { name: "cpp", shebang_line: "", comment_token: "//" },
    LanguageProfile { name: "go", shebang_line: "", comment_token: "//" },
    LanguageProfile { name: "rust", shebang_line: "", comment_token: "//" },
    LanguageProfile { name: "c-like", shebang_line: "", comment_token: "//" },
    LanguageProfile { name: "assembly", shebang_line: "", comment_token: ";" },
    LanguageProfile { name: "lisp", shebang_line: "", comment_token: ";" },
    LanguageProfile { name: GENERIC, shebang_line: "", comment_token: "#" },
];

const EXTENSIONS: &[(&str, &str)] = &[
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "zsh"),
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "javascript"),
    ("tsx", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("mts", "javascript"),
    ("cjs", "javascript"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("go", "go"),
    ("rs", "rust"),
    ("rb", "ruby"),
    ("pl", "perl"),
    ("php", "php"),
    ("java", "c-like"),
    ("kt", "c-like"),
    ("swift", "c-like"),
    ("cs", "c-like"),
    ("asm", "assembly"),
    ("s", "assembly"),
    ("lisp", "lisp"),
    ("el", "lisp"),
    ("clj", "lisp"),
    ("scm", "lisp"),
    ("toml", GENERIC),
    ("yaml", GENERIC),
    ("yml", GENERIC),
    ("conf", GENERIC),
    ("ini", GENERIC),
];

/// Immutable profile and extension tables.
#[derive(Debug)]
pub struct LanguageProfileTable {
    profiles: &'static [LanguageProfile],
    extensions: &'static [(&'static str, &'static str)],
}

static TABLE: OnceLock<LanguageProfileTable> = OnceLock::new();

impl LanguageProfileTable {
    pub fn get() -> &'static LanguageProfileTable {
        TABLE.get_or_init(|| LanguageProfileTable {
            profiles: PROFILES,
            extensions: EXTENSIONS,
        })
    }

    /// Profile by identifier, if known.
    pub fn by_name(&self, name: &str) -> Option<&LanguageProfile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    /// The fallback profile: `#` comments, no shebang.
    pub fn generic(&self) -> &LanguageProfile {
        self.by_name(GENERIC)
            .expect("generic profile is always present")
    }

    /// Profile for a file path, by extension (case-insensitive).
    ///
    /// Total: unknown or missing extensions map to the generic profile.
    pub fn for_path(&self, path: &Path) -> &LanguageProfile {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let name = extension.as_deref().and_then(|ext| {
            self.extensions
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, name)| *name)
        });

        match name.and_then(|name| self.by_name(name)) {
            Some(profile) => profile,
            None => self.generic(),
        }
    }

    /// Resolve the profile for a target file.
    ///
    /// An explicit shebang kind selects its own profile; `none` and `auto`
    /// fall back to extension detection.
    pub fn detect(&self, shebang: &ShebangKind, path: &Path) -> &LanguageProfile {
        let profile = match shebang {
            ShebangKind::Explicit(name) => self.by_name(name).unwrap_or_else(|| self.for_path(path)),
            ShebangKind::None | ShebangKind::Auto => self.for_path(path),
        };
        debug!("Detected profile '{}' for {}", profile.name, path.display());
        profile
    }

    /// Identifiers accepted as an explicit shebang kind.
    pub fn supported_shebangs(&self) -> Vec<&'static str> {
        self.profiles
            .iter()
            .filter(|profile| profile.has_shebang())
            .map(|profile| profile.name)
            .collect()
    }
}
