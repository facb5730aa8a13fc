use std::path::Path;

use crate::error::{DigestError, Result};

/// Marker that opens a section header line, followed by the section name.
pub const HEADER_MARKER: &str = "### ";

/// Marker that identifies an entry line once leading whitespace is trimmed.
const BULLET_MARKER: &str = "- ";

/// What to append to a document: the section to file under, the entry text,
/// and an optional label. An empty `prefix` produces a numbered entry.
#[derive(Debug, Clone, Copy)]
pub struct InsertionRequest<'a> {
    pub section: &'a str,
    pub text: &'a str,
    pub prefix: &'a str,
}

/// Result of applying an [`InsertionRequest`] to a document's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub content: String,
    /// The section header did not exist and was appended.
    pub created_section: bool,
    /// Number of entries the section held before this insertion.
    pub prior_entries: usize,
}

/// Applies `request` to `content` and returns the new document text.
///
/// Lines keep their original terminators. The only change made to existing
/// content is a `\n` added to a final unterminated line when something is
/// placed after it.
///
/// Line breaks and whitespace runs in the section name, text and prefix are
/// collapsed to single spaces, so an entry always adds one line (two with a
/// prefix) and can never open a header of its own.
pub fn insert_into(content: &str, request: &InsertionRequest) -> Insertion {
    let section = single_line(request.section);
    let text = single_line(request.text);
    let prefix = single_line(request.prefix);

    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    let header = format!("{}{}", HEADER_MARKER, section);

    let (anchor, created_section) = match lines.iter().position(|line| strip_terminator(line) == header) {
        Some(index) => (index, false),
        None => {
            terminate_last_line(&mut lines);
            lines.push(format!("{}\n", header));
            (lines.len() - 1, true)
        }
    };

    // Body runs until the next header or the end of the document
    let body_end = lines[anchor + 1..]
        .iter()
        .position(|line| line.starts_with(HEADER_MARKER))
        .map_or(lines.len(), |offset| anchor + 1 + offset);

    let prior_entries = lines[anchor + 1..body_end]
        .iter()
        .filter(|line| line.trim().starts_with(BULLET_MARKER))
        .count();

    let entry = if prefix.is_empty() {
        vec![format!(" - {}. {}\n", prior_entries + 1, text)]
    } else {
        vec![format!(" - {}:\n", prefix), format!(" {}\n", text)]
    };

    if body_end == lines.len() {
        terminate_last_line(&mut lines);
    }
    lines.splice(body_end..body_end, entry);

    Insertion {
        content: lines.concat(),
        created_section,
        prior_entries,
    }
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn terminate_last_line(lines: &mut [String]) {
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
}

/// Appends entries to `### ` sections of markdown documents on disk.
///
/// Every call reads the whole file and overwrites it. There is no locking:
/// two runs editing the same document at once can lose one of the updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionEditor;

impl SectionEditor {
    pub fn new() -> Self {
        SectionEditor
    }

    /// Inserts an entry into `section` of the document at `path`, creating
    /// the section at the end of the document if it is missing.
    pub fn insert_entry(&self, path: &Path, section: &str, text: &str, prefix: &str) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| DigestError::io(path, e))?;

        let insertion = insert_into(
            &content,
            &InsertionRequest {
                section,
                text,
                prefix,
            },
        );

        if insertion.created_section {
            tracing::warn!(
                "Section '{}' not found in {}, created it.",
                section,
                path.display()
            );
        }

        std::fs::write(path, &insertion.content).map_err(|e| DigestError::io(path, e))?;

        tracing::info!(
            "Added new point to section '{}' in {}.",
            section,
            path.display()
        );
        Ok(())
    }
}
