//! PaperDigest — summarize the newest PDF paper with an LLM and file the
//! result into category-organized markdown notes.

pub mod config;
pub mod digest;
pub mod error;
pub mod llm;
pub mod pdf;
pub mod prompt;
pub mod response;
pub mod section;

pub use config::Config;
pub use digest::Digester;
pub use error::{DigestError, Result};
pub use response::PaperDigest;
pub use section::SectionEditor;
