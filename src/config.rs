use std::path::PathBuf;

use crate::error::{DigestError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_PAPER_FOLDER: &str = "LLM_papers";
pub const DEFAULT_INBOX: &str = "new_papers";
pub const DEFAULT_PAGES: usize = 2;

/// Settings for one run, built once at startup and passed to the components
/// that need them.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    /// Root folder holding `description.md` and one sub-folder per category.
    pub paper_folder: PathBuf,
    /// Folder scanned for the newest PDF.
    pub inbox: PathBuf,
    /// Number of leading pages sent to the model.
    pub pages: usize,
}

impl Config {
    /// Reads `OPENAI_API_KEY`, `COMPLETION_MODEL` and `COMPLETION_TEMPERATURE`
    /// from the environment. Folders and page count start at their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DigestError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let model = lookup("COMPLETION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match lookup("COMPLETION_TEMPERATURE") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                DigestError::Config(format!("COMPLETION_TEMPERATURE is not a number: {}", raw))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        Ok(Config {
            api_key,
            model,
            temperature,
            paper_folder: PathBuf::from(DEFAULT_PAPER_FOLDER),
            inbox: PathBuf::from(DEFAULT_INBOX),
            pages: DEFAULT_PAGES,
        })
    }

    pub fn description_path(&self) -> PathBuf {
        self.paper_folder.join("description.md")
    }

    /// Path of the notes file kept inside a category's own folder.
    pub fn category_path(&self, category: &str) -> PathBuf {
        self.paper_folder
            .join(category)
            .join(format!("{}.md", category))
    }
}
