use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use paper_digest::llm::SummarizationService;
use paper_digest::pdf::TextSource;
use paper_digest::{Config, DigestError, Digester};
use tempfile::TempDir;

struct FakeSource {
    latest: Option<PathBuf>,
    text: String,
}

impl TextSource for FakeSource {
    fn find_latest(&self, _dir: &Path) -> paper_digest::Result<Option<PathBuf>> {
        Ok(self.latest.clone())
    }

    fn extract_text(&self, _path: &Path, _max_pages: usize) -> paper_digest::Result<String> {
        Ok(self.text.clone())
    }
}

struct FakeService {
    reply: String,
    seen: Mutex<Vec<(String, String)>>,
}

impl FakeService {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SummarizationService for FakeService {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> paper_digest::Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_text.to_string()));
        Ok(self.reply.clone())
    }
}

/// A paper folder with two categories and an existing description file.
fn paper_folder() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("LLM_papers");
    std::fs::create_dir_all(root.join("Agents")).unwrap();
    std::fs::create_dir_all(root.join("Vision")).unwrap();
    std::fs::write(
        root.join("description.md"),
        "# Papers\n### Agents\n - Older Agent:\n https://old.example\n### Vision\n",
    )
    .unwrap();
    std::fs::write(root.join("Agents/Agents.md"), "# Agents\n").unwrap();
    std::fs::write(root.join("Vision/Vision.md"), "# Vision\n").unwrap();

    let config = Config {
        api_key: "test".to_string(),
        model: "fake-model".to_string(),
        temperature: 0.2,
        paper_folder: root,
        inbox: dir.path().join("new_papers"),
        pages: 2,
    };
    (dir, config)
}

fn source() -> FakeSource {
    FakeSource {
        latest: Some(PathBuf::from("new_papers/toolformer.pdf")),
        text: "Abstract. We teach models to use tools.".to_string(),
    }
}

#[tokio::test]
async fn test_files_paper_into_both_documents() {
    let (_dir, config) = paper_folder();
    let root = config.paper_folder.clone();
    let service = FakeService::new(
        "Summary: Models learn to call tools.\nCategory: agents\nTitle: Toolformer",
    );
    let digester = Digester::new(config, source(), service);

    let mut asked_for = String::new();
    let digest = digester
        .run(|name| {
            asked_for = name.to_string();
            Ok("https://arxiv.org/abs/2302.04761".to_string())
        })
        .await
        .unwrap();

    assert_eq!(asked_for, "toolformer");
    assert_eq!(digest.category, "Agents");
    assert_eq!(digest.title, "Toolformer");

    let description = std::fs::read_to_string(root.join("description.md")).unwrap();
    assert_eq!(
        description,
        "# Papers\n### Agents\n - Older Agent:\n https://old.example\n \
         - Toolformer:\n https://arxiv.org/abs/2302.04761\n### Vision\n"
    );

    let notes = std::fs::read_to_string(root.join("Agents/Agents.md")).unwrap();
    assert_eq!(
        notes,
        "# Agents\n### Toolformer\n - Summary:\n Models learn to call tools.\n"
    );

    let vision = std::fs::read_to_string(root.join("Vision/Vision.md")).unwrap();
    assert_eq!(vision, "# Vision\n");
}

#[tokio::test]
async fn test_chatty_reply_files_single_line_entries() {
    let (_dir, config) = paper_folder();
    let root = config.paper_folder.clone();
    let service = FakeService::new(
        "Summary: Models learn to call tools.\n\nThey pick the calls themselves.\n\
         Category: Agents\n\
         Title: Toolformer\n\nHope this helps!",
    );
    let digester = Digester::new(config, source(), service);

    let digest = digester.run(|_| Ok("site".to_string())).await.unwrap();
    assert_eq!(digest.title, "Toolformer");

    let notes = std::fs::read_to_string(root.join("Agents/Agents.md")).unwrap();
    assert_eq!(
        notes,
        "# Agents\n### Toolformer\n - Summary:\n \
         Models learn to call tools. They pick the calls themselves.\n"
    );
}

#[tokio::test]
async fn test_prompt_lists_categories_and_sends_text() {
    let (_dir, config) = paper_folder();
    let digester = Digester::new(
        config,
        source(),
        FakeService::new("Summary: s\nCategory: Vision\nTitle: t"),
    );

    digester.run(|_| Ok(String::new())).await.unwrap();

    let seen = digester.service().seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let (system, user) = &seen[0];
    assert!(system.contains("1. Agents\n2. Vision\n"));
    assert_eq!(user, "Abstract. We teach models to use tools.");
}

#[tokio::test]
async fn test_no_pdf_reports_no_input() {
    let (_dir, config) = paper_folder();
    let root = config.paper_folder.clone();
    let before = std::fs::read_to_string(root.join("description.md")).unwrap();

    let digester = Digester::new(
        config,
        FakeSource {
            latest: None,
            text: String::new(),
        },
        FakeService::new("unused"),
    );

    let err = digester
        .run(|_| panic!("website must not be asked for"))
        .await
        .unwrap_err();
    assert!(matches!(err, DigestError::NoInputFound(_)));
    assert_eq!(
        std::fs::read_to_string(root.join("description.md")).unwrap(),
        before
    );
}

#[tokio::test]
async fn test_malformed_reply_leaves_files_untouched() {
    let (_dir, config) = paper_folder();
    let root = config.paper_folder.clone();
    let before = std::fs::read_to_string(root.join("description.md")).unwrap();

    let digester = Digester::new(
        config,
        source(),
        FakeService::new("Summary: s\nTitle: no category here"),
    );

    let err = digester.run(|_| Ok("site".to_string())).await.unwrap_err();
    assert!(matches!(
        err,
        DigestError::MalformedResponse { marker: "Category:" }
    ));
    assert_eq!(
        std::fs::read_to_string(root.join("description.md")).unwrap(),
        before
    );
    assert_eq!(
        std::fs::read_to_string(root.join("Agents/Agents.md")).unwrap(),
        "# Agents\n"
    );
}

#[tokio::test]
async fn test_unknown_category_fails_on_missing_notes_file() {
    let (_dir, config) = paper_folder();
    let digester = Digester::new(
        config,
        source(),
        FakeService::new("Summary: s\nCategory: Robotics\nTitle: t"),
    );

    let err = digester.run(|_| Ok("site".to_string())).await.unwrap_err();
    assert!(matches!(err, DigestError::Io { .. }));
}
