use std::path::Path;

use crate::error::{DigestError, Result};
use crate::response::{CATEGORY_MARKER, SUMMARY_MARKER, TITLE_MARKER};

/// Lists the category names, i.e. the immediate sub-folders of `paper_folder`.
pub fn list_categories(paper_folder: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(paper_folder).map_err(|e| DigestError::io(paper_folder, e))?;

    let mut categories = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DigestError::io(paper_folder, e))?;
        let is_dir = entry
            .file_type()
            .map_err(|e| DigestError::io(entry.path(), e))?
            .is_dir();
        if is_dir {
            categories.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    categories.sort();
    Ok(categories)
}

/// Builds the system instruction asking for a summary, a category out of
/// `categories` and a short title, each in its own labelled section.
pub fn system_prompt(categories: &[String]) -> String {
    let mut prompt = format!(
        "Please summarize the main contribution of the following paper in at most 3 sentences, \
         assign it to one of the {} categories below, and give it a short title:\n",
        categories.len()
    );
    for (i, category) in categories.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, category));
    }
    prompt.push_str(&format!(
        "Your response must have 3 sections, one starting with '{}', one starting with '{}', \
         and one starting with '{}'. Write everything in plain text without any formatting.\n",
        SUMMARY_MARKER, CATEGORY_MARKER, TITLE_MARKER
    ));
    prompt.push_str("\nPaper: \n");
    prompt
}

/// Maps the category named by the model onto a known category folder.
///
/// Leading list numbering (`"2. Agents"`) is dropped and names are compared
/// case-insensitively. Unknown names are returned unchanged.
pub fn resolve_category(raw: &str, categories: &[String]) -> String {
    let name = strip_numbering(raw.trim());

    categories
        .iter()
        .find(|known| known.eq_ignore_ascii_case(name))
        .cloned()
        .unwrap_or_else(|| raw.trim().to_string())
}

fn strip_numbering(name: &str) -> &str {
    match name.split_once(". ") {
        Some((number, rest)) if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) => {
            rest.trim()
        }
        _ => name,
    }
}
