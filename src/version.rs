//! Semantic version parsing and the update policy.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{HeaderError, Result};
use crate::field::HeaderField;
use crate::header::HeaderRecord;
use crate::i18n::{Language, TranslationCatalog};

/// Version rendered into every freshly created header.
pub const INITIAL_VERSION: Version = Version::new(1, 0, 0);

static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();

fn version_regex() -> &'static Regex {
    VERSION_REGEX.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").unwrap())
}

/// A `(major, minor, patch)` triple; ordering is componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// Parse `X.Y` or `X.Y.Z`; a missing patch component is 0.
    pub fn parse(value: &str) -> Result<Self> {
        let malformed = || HeaderError::MalformedVersion(value.to_string());
        let caps = version_regex().captures(value.trim()).ok_or_else(malformed)?;

        let component = |index: usize| -> Result<u64> {
            match caps.get(index) {
                Some(m) => m.as_str().parse().map_err(|_| malformed()),
                None => Ok(0),
            }
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }

    pub fn bump_major(self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }

    pub fn bump_minor(self) -> Self {
        Self::new(self.major, self.minor + 1, 0)
    }

    pub fn bump_patch(self) -> Self {
        Self::new(self.major, self.minor, self.patch + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How an update moves the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDirective {
    Major,
    Minor,
    Patch,
    /// Taken verbatim, e.g. `3.5` stays `3.5`
    Literal(String),
}

impl UpdateDirective {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "major" => Ok(UpdateDirective::Major),
            "minor" => Ok(UpdateDirective::Minor),
            "patch" => Ok(UpdateDirective::Patch),
            _ if version_regex().is_match(value) => Ok(UpdateDirective::Literal(value.to_string())),
            _ => Err(HeaderError::InvalidUpdateArgument(value.to_string())),
        }
    }
}

/// The version an update writes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextVersion {
    Bumped(Version),
    Literal(String),
}

impl fmt::Display for NextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextVersion::Bumped(version) => version.fmt(f),
            NextVersion::Literal(literal) => f.write_str(literal),
        }
    }
}

/// Apply the update policy to `current`.
pub fn next_version(current: Version, directive: &UpdateDirective) -> NextVersion {
    match directive {
        UpdateDirective::Major => NextVersion::Bumped(current.bump_major()),
        UpdateDirective::Minor => NextVersion::Bumped(current.bump_minor()),
        UpdateDirective::Patch => NextVersion::Bumped(current.bump_patch()),
        UpdateDirective::Literal(literal) => NextVersion::Literal(literal.clone()),
    }
}

/// Find the localized `Version: x.y.z` line in the header of `text` and parse it.
pub fn extract_version(
    text: &str,
    language: Language,
    catalog: &TranslationCatalog,
) -> Result<Version> {
    let record = HeaderRecord::scan(text, language, catalog)?;
    match record.value(text, HeaderField::Version) {
        Some(value) => Version::parse(value),
        None => Err(HeaderError::NoVersionFound {
            label: catalog.label(HeaderField::Version, language)?.to_string(),
        }),
    }
}
