use crate::error::{DigestError, Result};

pub const SUMMARY_MARKER: &str = "Summary:";
pub const CATEGORY_MARKER: &str = "Category:";
pub const TITLE_MARKER: &str = "Title:";

const MARKERS: [&str; 3] = [SUMMARY_MARKER, CATEGORY_MARKER, TITLE_MARKER];

/// The three labelled parts of a model reply about one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperDigest {
    pub summary: String,
    pub category: String,
    pub title: String,
}

impl PaperDigest {
    /// Parses a reply containing `Summary:`, `Category:` and `Title:` sections.
    ///
    /// Each marker is located on its own, so the sections may come in any
    /// order. A field runs from the end of its marker to the next marker or
    /// the end of the reply. The category and the title stop at their first
    /// line break, which drops any chatter the model adds after them.
    pub fn parse(reply: &str) -> Result<Self> {
        let mut starts = [0usize; 3];
        for (start, marker) in starts.iter_mut().zip(MARKERS) {
            *start = reply
                .find(marker)
                .ok_or(DigestError::MalformedResponse { marker })?;
        }

        let field = |index: usize| {
            let begin = starts[index] + MARKERS[index].len();
            let end = starts
                .iter()
                .copied()
                .filter(|&start| start >= begin)
                .min()
                .unwrap_or(reply.len());
            clean(&reply[begin..end])
        };

        Ok(PaperDigest {
            summary: field(0),
            category: first_line(&field(1)),
            title: first_line(&field(2)),
        })
    }
}

/// Trims whitespace and any bold/italic asterisks left around a field.
fn clean(field: &str) -> String {
    field
        .trim_matches(|c: char| c == '*' || c.is_whitespace())
        .to_string()
}

fn first_line(field: &str) -> String {
    clean(field.lines().next().unwrap_or(""))
}
