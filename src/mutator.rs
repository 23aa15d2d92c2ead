//! File-level operations: create with header, prepend header, update in place.
//!
//! Every mode computes the complete new file content first and then commits it
//! through a temporary sibling file that is atomically renamed over the target.
//! A failure before the rename leaves the original untouched, and the
//! temporary file is removed when dropped.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use tempfile::{Builder, NamedTempFile};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{HeaderError, Result};
use crate::field::HeaderField;
use crate::header::HeaderRecord;
use crate::i18n::TranslationCatalog;
use crate::profile::LanguageProfileTable;
use crate::render::{format_timestamp, HeaderRenderer, SHEBANG_MARKER};
use crate::version::{next_version, UpdateDirective, Version};

/// Which operation a file gets, decided by file-system state and intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Target did not exist
    Create,
    /// Target existed; a new header goes on top
    Prepend,
    /// Target's existing header fields were rewritten
    Update,
}

/// The computed result of an operation, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub mode: Mode,
    pub content: Vec<u8>,
}

pub struct HeaderMutator<'a> {
    config: &'a Config,
    catalog: &'a TranslationCatalog,
    profiles: &'a LanguageProfileTable,
    now: NaiveDateTime,
}

impl<'a> HeaderMutator<'a> {
    pub fn new(
        config: &'a Config,
        catalog: &'a TranslationCatalog,
        profiles: &'a LanguageProfileTable,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            config,
            catalog,
            profiles,
            now,
        }
    }

    /// Compute the new content of `path` without touching the file system.
    pub fn plan(&self, path: &Path, update: Option<&UpdateDirective>) -> Result<Plan> {
        let exists = path.exists();

        match (update, exists) {
            (Some(_), false) => Err(HeaderError::MissingFile(path.to_path_buf())),
            (Some(directive), true) => {
                let original = fs::read_to_string(path).map_err(|e| HeaderError::io(path, e))?;
                Ok(Plan {
                    mode: Mode::Update,
                    content: self.updated(&original, directive)?.into_bytes(),
                })
            }
            (None, true) => {
                let original = fs::read(path).map_err(|e| HeaderError::io(path, e))?;
                Ok(Plan {
                    mode: Mode::Prepend,
                    content: self.prepended(path, &original)?,
                })
            }
            (None, false) => Ok(Plan {
                mode: Mode::Create,
                content: self.prepended(path, &[])?,
            }),
        }
    }

    /// Plan and commit. Returns the mode that was applied.
    pub fn apply(&self, path: &Path, update: Option<&UpdateDirective>) -> Result<Mode> {
        let plan = self.plan(path, update)?;
        write_atomic(path, &plan.content)?;
        info!("{:?} applied to {}", plan.mode, path.display());
        Ok(plan.mode)
    }

    /// `original` with a freshly rendered header on top.
    ///
    /// When `original` already starts with a shebang, the header goes right
    /// after that line instead and no second shebang is written. Either way
    /// the new content ends with `original` byte for byte once that leading
    /// shebang line is set aside.
    fn prepended(&self, path: &Path, original: &[u8]) -> Result<Vec<u8>> {
        let profile = self.profiles.detect(&self.config.shebang, path);
        let header = HeaderRenderer::new(self.catalog).render(self.config, profile, &self.now)?;

        let (first_line, rest) = split_first_line(original);
        let existing_first = std::str::from_utf8(first_line).ok();
        let shebang = HeaderRenderer::shebang(self.config, profile, existing_first);

        let mut content = Vec::with_capacity(original.len() + header.len() + 64);
        if first_line.starts_with(SHEBANG_MARKER.as_bytes()) {
            content.extend_from_slice(first_line);
            if !first_line.ends_with(b"\n") {
                content.push(b'\n');
            }
            content.extend_from_slice(header.as_bytes());
            content.extend_from_slice(rest);
        } else {
            if let Some(line) = shebang {
                content.extend_from_slice(line.as_bytes());
                content.push(b'\n');
            }
            content.extend_from_slice(header.as_bytes());
            content.extend_from_slice(original);
        }
        Ok(content)
    }

    /// `original` with Version, Last edited by and Last edited on rewritten.
    fn updated(&self, original: &str, directive: &UpdateDirective) -> Result<String> {
        let language = self.config.language;
        let record = HeaderRecord::scan(original, language, self.catalog)?;

        let current = match record.value(original, HeaderField::Version) {
            Some(value) => Version::parse(value)?,
            None => {
                return Err(HeaderError::NoVersionFound {
                    label: self.catalog.label(HeaderField::Version, language)?.to_string(),
                })
            }
        };
        let next = next_version(current, directive);
        info!("Updating version {} -> {}", current, next);

        for field in [HeaderField::LastEditedBy, HeaderField::LastEditedOn] {
            if !record.contains(field) {
                warn!(
                    "No '{}' line found, leaving it out of the update",
                    self.catalog.label(field, language)?
                );
            }
        }

        Ok(record.splice(
            original,
            &[
                (HeaderField::Version, next.to_string()),
                (HeaderField::LastEditedBy, self.config.author.clone()),
                (HeaderField::LastEditedOn, format_timestamp(&self.now)),
            ],
        ))
    }
}

/// Split off the first line, terminator included.
fn split_first_line(content: &[u8]) -> (&[u8], &[u8]) {
    match content.iter().position(|&byte| byte == b'\n') {
        Some(index) => content.split_at(index + 1),
        None => (content, &content[content.len()..]),
    }
}

/// Replace `path` with `content` via a temporary file in the same directory.
///
/// Existing permissions (e.g. the executable bit of a script) are kept. A new
/// file gets the same mode a plain create would give it.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = temp_file_for(path, dir).map_err(|e| HeaderError::io(dir, e))?;
    temp.write_all(content)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| HeaderError::io(temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| HeaderError::io(temp.path(), e))?;
    }

    temp.persist(path)
        .map_err(|e| HeaderError::io(path, e.error))?;
    Ok(())
}

/// Temporary sibling of `target` in `dir`.
///
/// Temporary files are owner-only by default; when `target` is new, ask for
/// 0o666 instead so the process umask decides, as with `File::create`.
#[cfg_attr(not(unix), allow(unused_variables, unused_mut))]
fn temp_file_for(target: &Path, dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if !target.exists() {
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
    }
    builder.tempfile_in(dir)
}
