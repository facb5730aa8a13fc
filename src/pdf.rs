use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{DigestError, Result};

/// Something that can hand over the newest paper in a directory and its text.
pub trait TextSource {
    /// Returns the most recently modified paper in `dir`, if any.
    fn find_latest(&self, dir: &Path) -> Result<Option<PathBuf>>;

    /// Returns the text of the first `max_pages` pages of the paper at `path`.
    fn extract_text(&self, path: &Path, max_pages: usize) -> Result<String>;
}

/// [`TextSource`] backed by PDF files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfSource;

impl TextSource for PdfSource {
    fn find_latest(&self, dir: &Path) -> Result<Option<PathBuf>> {
        find_latest(dir)
    }

    fn extract_text(&self, path: &Path, max_pages: usize) -> Result<String> {
        extract_text(path, max_pages)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Finds the most recently modified `.pdf` file directly inside `dir`.
pub fn find_latest(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DigestError::io(dir, e))?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| DigestError::io(dir, e))?;
        let path = entry.path();
        if !is_pdf(&path) {
            continue;
        }

        let metadata = entry.metadata().map_err(|e| DigestError::io(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(|e| DigestError::io(&path, e))?;

        if latest.as_ref().map_or(true, |(newest, _)| modified > *newest) {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

/// Extracts the text of the first `max_pages` pages of a PDF.
///
/// Page texts are concatenated as-is; pages beyond the end of the document
/// are skipped. `pdf_extract` decodes every page before the leading ones are
/// picked, so a damaged page anywhere in the file fails the extraction and
/// long documents take longer than their first pages would suggest.
pub fn extract_text(path: &Path, max_pages: usize) -> Result<String> {
    if !is_pdf(path) {
        return Err(DigestError::Pdf {
            path: path.to_path_buf(),
            message: "file is not a PDF".to_string(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| DigestError::io(path, e))?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| DigestError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    leading_pages(path, pages, max_pages)
}

/// Joins the first `max_pages` pages, failing if they hold no text at all
/// (image-based or encrypted PDFs).
fn leading_pages(path: &Path, pages: Vec<String>, max_pages: usize) -> Result<String> {
    let text: String = pages.into_iter().take(max_pages).collect();

    if text.trim().is_empty() {
        return Err(DigestError::Pdf {
            path: path.to_path_buf(),
            message: "no text could be extracted, it may be image-based or encrypted".to_string(),
        });
    }

    Ok(text)
}
