use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use paper_digest::config::{DEFAULT_INBOX, DEFAULT_PAGES, DEFAULT_PAPER_FOLDER};
use paper_digest::llm::OpenAiService;
use paper_digest::pdf::PdfSource;
use paper_digest::{Config, DigestError, Digester};

/// PaperDigest — summarize the newest PDF paper and file it into your notes.
///
/// Reads the first pages of the latest PDF in the inbox, asks an OpenAI model
/// for a summary, a category and a short title, then appends them to
/// `description.md` and to the notes file of the chosen category.
#[derive(Parser)]
#[command(name = "paper_digest")]
#[command(version = "0.1.0")]
#[command(about = "Summarize the latest PDF paper into categorized markdown notes", long_about = None)]
struct Cli {
    /// Folder holding description.md and one sub-folder per category
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_PAPER_FOLDER)]
    folder: PathBuf,

    /// Folder scanned for the most recently modified PDF
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_INBOX)]
    inbox: PathBuf,

    /// Number of leading pages sent to the model
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_PAGES)]
    pages: usize,

    /// Website of the paper; asked for interactively when omitted
    #[arg(short, long, value_name = "URL")]
    website: Option<String>,

    /// Completion model, overrides COMPLETION_MODEL
    #[arg(short, long, value_name = "NAME")]
    model: Option<String>,
}

/// Asks the user on stdin for the website of `paper_name`.
fn prompt_website(paper_name: &str) -> paper_digest::Result<String> {
    print!("Enter the website of the paper {}: ", paper_name);
    std::io::stdout()
        .flush()
        .map_err(|e| DigestError::Io { path: "<stdout>".into(), source: e })?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| DigestError::Io { path: "<stdin>".into(), source: e })?;
    Ok(line.trim().to_string())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    config.paper_folder = cli.folder;
    config.inbox = cli.inbox;
    config.pages = cli.pages;
    if let Some(model) = cli.model {
        config.model = model;
    }

    let service = OpenAiService::new(&config)?;
    let digester = Digester::new(config, PdfSource, service);

    let website = cli.website;
    let result = digester
        .run(|paper_name| match website {
            Some(url) => Ok(url),
            None => prompt_website(paper_name),
        })
        .await;

    match result {
        Ok(digest) => {
            println!("\n{}", "=".repeat(60));
            println!("📝 {}\n", digest.title);
            println!("Category: {}", digest.category);
            println!("Summary:  {}", digest.summary);
            println!("{}", "=".repeat(60));
            Ok(())
        }
        Err(DigestError::NoInputFound(dir)) => {
            println!("No PDF files found in {}.", dir.display());
            Ok(())
        }
        Err(e) => Err(e).context("Failed to file the paper"),
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}
