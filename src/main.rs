//! Perplexia-RS: a minimal cited-answer web search assistant
//!
//! This is the main entry point for the application.

use anyhow::Result;
use perplexia_rs::{config::Settings, Pipeline};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        print_usage();
        return Ok(());
    }
    if args[0] == "-V" || args[0] == "--version" {
        println!("perplexia-rs v{}", perplexia_rs::VERSION);
        return Ok(());
    }
    let query = args.join(" ");

    // Load configuration before logging so debug mode applies
    let settings = load_settings()?;

    // Initialize logging
    let level = if settings.general.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    info!(
        "starting {} v{}",
        settings.general.instance_name,
        perplexia_rs::VERSION
    );

    // Run the pipeline
    let pipeline = Pipeline::new(settings)?;
    let document = pipeline.run(&query).await?;

    // Persist and display the artifact
    let rendered = document.render();
    let file_name = document.file_name();
    tokio::fs::write(&file_name, &rendered).await?;
    info!("saved answer to {}", file_name);

    println!("{}", rendered);

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check for settings file in various locations
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/perplexia/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("perplexia-rs/settings.yml"))
            .unwrap_or_default(),
    ];

    // Check environment variable first
    if let Ok(path) = std::env::var("PERPLEXIA_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Try each default path
    for path in paths.iter() {
        if path.exists() {
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Perplexia-RS v{}
A minimal cited-answer web search assistant written in Rust

USAGE:
    perplexia-rs <QUERY>...

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    PERPLEXIA_SETTINGS_PATH    Path to settings.yml
    PERPLEXIA_OPENAI_API_KEY   API key for the completion provider
    OPENAI_API_KEY             Fallback API key
    PERPLEXIA_MODEL            Completion model (default: gpt-4o)
    PERPLEXIA_NUM_RESULTS      Search result URLs to fetch (default: 20)
    PERPLEXIA_PAGE_TIMEOUT     Per-page timeout in seconds (default: 15)
    PERPLEXIA_GLOBAL_TIMEOUT   Collection budget in seconds (default: 39)
    PERPLEXIA_DEBUG            Enable debug logging (true/false)

The answer is printed to stdout and saved as "<query>.md".
"#,
        perplexia_rs::VERSION
    );
}
