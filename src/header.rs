//! Locating field values inside an already rendered header.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::config::COMMENT_TOKENS;
use crate::error::{HeaderError, Result};
use crate::field::HeaderField;
use crate::i18n::{Language, TranslationCatalog};
use crate::render::{SEPARATOR_REPEAT, SHEBANG_MARKER};

/// Byte spans of the updatable field values found in a file's header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRecord {
    spans: BTreeMap<HeaderField, Range<usize>>,
}

impl HeaderRecord {
    /// Scan the header of `text` for the localized Version / Last edited by /
    /// Last edited on lines.
    ///
    /// Only the comment block at the top of the file is searched, and a line
    /// counts only if it starts with that block's comment token. A label
    /// present on more than one line is an `AmbiguousHeader` error; an absent
    /// label is simply missing from the record.
    pub fn scan(text: &str, language: Language, catalog: &TranslationCatalog) -> Result<Self> {
        let mut spans = BTreeMap::new();
        let Some((token, lines)) = header_region(text) else {
            return Ok(Self { spans });
        };

        for field in HeaderField::UPDATABLE {
            let pattern = catalog.line_pattern(field, language)?;

            let matches: Vec<Range<usize>> = lines
                .iter()
                .filter_map(|&(offset, line)| {
                    let start = offset + token.len();
                    let caps = pattern.captures(&line[token.len()..])?;
                    let value = caps.name("block").or_else(|| caps.name("single"))?;
                    Some(start + value.start()..start + value.end())
                })
                .collect();

            match matches.len() {
                0 => {}
                1 => {
                    spans.insert(field, matches[0].clone());
                }
                count => {
                    return Err(HeaderError::AmbiguousHeader {
                        label: catalog.label(field, language)?.to_string(),
                        count,
                    })
                }
            }
        }

        Ok(Self { spans })
    }

    pub fn contains(&self, field: HeaderField) -> bool {
        self.spans.contains_key(&field)
    }

    /// The current value of `field`, borrowed from the scanned text.
    pub fn value<'t>(&self, text: &'t str, field: HeaderField) -> Option<&'t str> {
        self.spans.get(&field).map(|span| &text[span.clone()])
    }

    /// Replace the values of the given fields, leaving every other byte as is.
    ///
    /// Fields missing from the record are skipped.
    pub fn splice(&self, text: &str, replacements: &[(HeaderField, String)]) -> String {
        let mut edits: Vec<(&Range<usize>, &str)> = replacements
            .iter()
            .filter_map(|(field, value)| self.spans.get(field).map(|span| (span, value.as_str())))
            .collect();
        // Right to left, so earlier offsets stay valid.
        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

        let mut output = text.to_string();
        for (span, value) in edits {
            output.replace_range(span.clone(), value);
        }
        output
    }
}

/// The comment token opening `line`, longest first so `//` beats `/`.
fn leading_token(line: &str) -> Option<&'static str> {
    let mut tokens = COMMENT_TOKENS;
    tokens.sort_by_key(|token| std::cmp::Reverse(token.len()));
    tokens.into_iter().find(|token| line.starts_with(token))
}

/// The comment token and lines of the header at the top of `text`.
///
/// The region starts after an optional shebang line and runs over contiguous
/// lines opening with the token of its first line. A blank line ends it,
/// unless a block separator follows directly, as happens when block headers
/// have been prepended onto each other.
fn header_region(text: &str) -> Option<(&'static str, Vec<(usize, &str)>)> {
    let mut lines = lines_with_offsets(text).peekable();
    if lines
        .peek()
        .is_some_and(|(_, line)| line.starts_with(SHEBANG_MARKER))
    {
        lines.next();
    }

    let token = leading_token(lines.peek()?.1)?;
    let separator = token.repeat(SEPARATOR_REPEAT);

    let mut region = Vec::new();
    while let Some((offset, line)) = lines.next() {
        if line.starts_with(token) {
            region.push((offset, line));
        } else if line.is_empty() && lines.peek().is_some_and(|(_, next)| *next == separator) {
            continue;
        } else {
            break;
        }
    }
    Some((token, region))
}

/// Lines without their terminator, paired with their byte offset in `text`.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        let trimmed = line.strip_suffix('\n').unwrap_or(line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Some((start, trimmed))
    })
}
