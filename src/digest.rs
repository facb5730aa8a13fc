use crate::config::Config;
use crate::error::{DigestError, Result};
use crate::llm::SummarizationService;
use crate::pdf::TextSource;
use crate::prompt;
use crate::response::PaperDigest;
use crate::section::SectionEditor;

/// Files the newest paper of the inbox into the markdown notes.
///
/// Composes a [`TextSource`], a [`SummarizationService`] and the
/// [`SectionEditor`]; none of them knows about the others.
pub struct Digester<S, L> {
    config: Config,
    source: S,
    service: L,
    editor: SectionEditor,
}

impl<S: TextSource, L: SummarizationService> Digester<S, L> {
    pub fn new(config: Config, source: S, service: L) -> Self {
        Self {
            config,
            source,
            service,
            editor: SectionEditor::new(),
        }
    }

    /// The summarization service this digester calls. Mostly useful to
    /// inspect a test double after [`Digester::run`].
    pub fn service(&self) -> &L {
        &self.service
    }

    /// Runs the pipeline for the newest PDF in the inbox.
    ///
    /// Pipeline: Find PDF → Ask for website → Extract text → Summarize →
    /// Parse reply → Append to `description.md` and the category notes.
    ///
    /// `website` is called with the paper's file stem and returns the source
    /// website recorded next to it. Fails with [`DigestError::NoInputFound`]
    /// when the inbox holds no PDF. Nothing is written unless the reply parses.
    pub async fn run<F>(&self, website: F) -> Result<PaperDigest>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let config = &self.config;

        let pdf_path = self
            .source
            .find_latest(&config.inbox)?
            .ok_or_else(|| DigestError::NoInputFound(config.inbox.clone()))?;

        let paper_name = pdf_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let website = website(&paper_name)?;

        println!("  Extracting text from: {}", pdf_path.display());
        let text = self.source.extract_text(&pdf_path, config.pages)?;
        println!(
            "  Extracted {} characters from the first {} page(s).",
            text.len(),
            config.pages
        );

        let categories = prompt::list_categories(&config.paper_folder)?;
        let system_prompt = prompt::system_prompt(&categories);

        println!("  Asking {} for a summary...", config.model);
        let reply = self.service.complete(&system_prompt, &text).await?;
        println!("\n{}\n", reply);

        let mut digest = PaperDigest::parse(&reply)?;
        digest.category = prompt::resolve_category(&digest.category, &categories);

        self.editor.insert_entry(
            &config.description_path(),
            &digest.category,
            &website,
            &digest.title,
        )?;
        self.editor.insert_entry(
            &config.category_path(&digest.category),
            &digest.title,
            &digest.summary,
            "Summary",
        )?;

        println!("  Filed '{}' under '{}'.", digest.title, digest.category);
        Ok(digest)
    }
}
