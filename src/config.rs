//! Effective configuration: built-in defaults, then `.header_config`, then
//! per-invocation overrides.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{HeaderError, Result};
use crate::i18n::Language;
use crate::identity::IdentityProvider;
use crate::profile::{LanguageProfile, LanguageProfileTable};
use crate::prompt::DescriptionSource;

/// Name of the project config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".header_config";

/// Comment tokens accepted as an explicit choice.
pub const COMMENT_TOKENS: [&str; 4] = ["#", "//", ";", "/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    /// Separator-delimited block
    #[default]
    Default,
    /// One bracketed line per field
    Single,
}

impl Template {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "default" => Ok(Template::Default),
            "single" => Ok(Template::Single),
            _ => Err(HeaderError::invalid("template", value)),
        }
    }
}

/// Which interpreter line, if any, a new header gets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShebangKind {
    None,
    /// Use whatever the file extension's profile provides
    #[default]
    Auto,
    Explicit(String),
}

impl ShebangKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "none" => Ok(ShebangKind::None),
            "auto" => Ok(ShebangKind::Auto),
            _ if LanguageProfileTable::get().supported_shebangs().contains(&value) => {
                Ok(ShebangKind::Explicit(value.to_string()))
            }
            _ => Err(HeaderError::invalid("shebang", value)),
        }
    }
}

/// Resolved, immutable settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub author: String,
    pub language: Language,
    /// Explicit comment token; `None` means derive it from the profile
    pub comment: Option<String>,
    pub shebang: ShebangKind,
    pub template: Template,
    pub description: String,
}

impl Config {
    /// The comment token to render with. An explicit choice always wins.
    pub fn comment_token<'a>(&'a self, profile: &'a LanguageProfile) -> &'a str {
        self.comment.as_deref().unwrap_or(profile.comment_token)
    }
}

/// Built-in defaults, captured from the host environment.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub author: String,
    pub language: Language,
}

impl Defaults {
    /// Author from the identity provider; language from `locale` (first two
    /// characters), English when absent or unsupported.
    pub fn new(identity: &dyn IdentityProvider, locale: Option<&str>) -> Self {
        let language = match locale.and_then(Language::from_locale) {
            Some(language) => language,
            None => {
                debug!("No usable locale ({:?}), falling back to English", locale);
                Language::canonical()
            }
        };

        Self {
            author: identity.current_user(),
            language,
        }
    }

    /// Defaults from the process environment (`LANG`).
    pub fn from_env(identity: &dyn IdentityProvider) -> Self {
        let locale = std::env::var("LANG").ok();
        Self::new(identity, locale.as_deref())
    }
}

/// Raw values read from a `.header_config` file, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub author: Option<String>,
    pub language: Option<String>,
    pub shebang: Option<String>,
    pub template: Option<String>,
}

impl ConfigFile {
    /// Parse `Key=Value` lines. Blank and comment lines are skipped, unknown
    /// keys ignored; a later duplicate key wins.
    pub fn parse(content: &str) -> Self {
        let mut file = ConfigFile::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!("Skipping config line without '=': {}", line);
                continue;
            };
            let value = unquote(value.trim()).to_string();

            match key.trim() {
                "Author" => file.author = Some(value),
                "Language" => file.language = Some(value),
                "Shebang" => file.shebang = Some(value),
                "Template" => file.template = Some(value),
                other => debug!("Ignoring unknown config key '{}'", other),
            }
        }

        file
    }

    /// Load a config file if it exists.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| HeaderError::io(path, e))?;
        info!("Loaded config from {}", path.display());
        Ok(Some(Self::parse(&content)))
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Per-invocation overrides; each field applies independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub author: Option<String>,
    pub language: Option<String>,
    pub comment: Option<String>,
    pub shebang: Option<String>,
    pub template: Option<String>,
}

fn parse_comment(value: &str) -> Result<String> {
    if COMMENT_TOKENS.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(HeaderError::invalid("comment", value))
    }
}

/// Merge defaults, an optional config file and overrides into a `Config`.
///
/// Every supplied enumerated value is validated before the description
/// source is consulted, so invalid input never blocks on a prompt.
pub fn resolve(
    defaults: &Defaults,
    file: Option<&ConfigFile>,
    overrides: &Overrides,
    description: Option<&mut dyn DescriptionSource>,
) -> Result<Config> {
    let empty = ConfigFile::default();
    let file = file.unwrap_or(&empty);

    let author = overrides
        .author
        .clone()
        .or_else(|| file.author.clone())
        .unwrap_or_else(|| defaults.author.clone());

    let language = match overrides.language.as_deref().or(file.language.as_deref()) {
        Some(code) => Language::from_code(code)?,
        None => defaults.language,
    };

    let comment = overrides.comment.as_deref().map(parse_comment).transpose()?;

    let shebang = match overrides.shebang.as_deref().or(file.shebang.as_deref()) {
        Some(kind) => ShebangKind::parse(kind)?,
        None => ShebangKind::default(),
    };

    let template = match overrides.template.as_deref().or(file.template.as_deref()) {
        Some(name) => Template::parse(name)?,
        None => Template::default(),
    };

    let description = description
        .and_then(|source| source.read_description())
        .unwrap_or_default();

    let config = Config {
        author,
        language,
        comment,
        shebang,
        template,
        description,
    };
    debug!("Resolved config: {:?}", config);
    Ok(config)
}
