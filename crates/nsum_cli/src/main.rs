use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use nsum_core::{CacheStats, ProcessedArticle};
use nsum_inference::{InferenceConfig, ModelBackend};
use nsum_pipeline::{GatewayResponse, NewsSummarizer, Settings, DEFAULT_SUMMARY_WORDS};
use nsum_storage::StorageKind;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize Lebanese news articles in English", long_about = None)]
pub struct Cli {
    /// Article cache backend (memory, sqlite)
    #[arg(long, env = "NSUM_STORAGE", default_value = "sqlite")]
    storage: StorageKind,
    /// SQLite database file
    #[arg(long, env = "NSUM_DATABASE", default_value = "articles.db")]
    database: String,
    /// Model backend (huggingface, ollama, dummy)
    #[arg(long, env = "NSUM_MODEL_BACKEND", default_value = "huggingface")]
    backend: ModelBackend,
    /// Inference endpoint, defaults to the backend's public address
    #[arg(long, env = "NSUM_MODEL_URL")]
    model_url: Option<String>,
    #[arg(long, env = "NSUM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Probe each model with a tiny request when it is first loaded
    #[arg(long)]
    warm_up: bool,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape, translate and summarize one or more article URLs
    Summarize {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Reprocess even if the article is cached
        #[arg(long)]
        force_refresh: bool,
        /// Target summary length in words (30-200)
        #[arg(long, default_value_t = DEFAULT_SUMMARY_WORDS)]
        words: usize,
        /// How many URLs to process at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show the most recently processed articles
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Cache statistics
    Stats,
    /// Delete every cached article
    Clear {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// List the supported news sites
    Sources,
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut inference = InferenceConfig::new(self.backend);
        inference.endpoint = self.model_url.clone();
        inference.api_key = self.api_key.clone();
        inference.warm_up = self.warm_up;

        Settings {
            storage: self.storage,
            database: Some(self.database.clone()),
            inference,
            ..Default::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

fn print_response(response: &GatewayResponse) {
    let article = &response.article;
    println!("📰 {}", article.title);
    println!("   Source:    {}", article.source);
    println!("   URL:       {}", article.url);
    println!("   Published: {}", article.published);
    println!(
        "   Language:  {} ({}){}",
        article.language.name(),
        article.language.code(),
        if article.was_translated() { ", translated to English" } else { "" }
    );
    println!();
    println!("{}", article.summary);
    println!();
    println!(
        "   Cache: {} | processed in {:.2}s | answered in {:.2}s | {} words",
        response.cache,
        article.processing_time.as_secs_f64(),
        response.elapsed.as_secs_f64(),
        article.summary.split_whitespace().count()
    );
}

fn print_article_line(article: &ProcessedArticle) {
    println!(
        "{}  [{}] {} - {}",
        article.processed_at.format("%Y-%m-%d %H:%M"),
        article.language.code(),
        article.source,
        preview(&article.title, 70)
    );
    println!("    {}", preview(&article.summary, 120));
}

fn print_stats(stats: &CacheStats) {
    println!("📊 Cached articles: {}", stats.total);
    if !stats.by_language.is_empty() {
        println!("   By language:");
        for (language, count) in &stats.by_language {
            println!("     {:<4} {}", language, count);
        }
    }
    if !stats.by_source.is_empty() {
        println!("   By source:");
        for (source, count) in &stats.by_source {
            println!("     {:<14} {}", source, count);
        }
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

async fn summarize(
    app: &NewsSummarizer,
    urls: Vec<String>,
    force_refresh: bool,
    words: usize,
    concurrency: usize,
    json: bool,
) -> anyhow::Result<()> {
    let total = urls.len();
    let results: Vec<_> = stream::iter(urls)
        .map(|url| async move {
            let result = app.summarize_url(&url, force_refresh, Some(words)).await;
            (url, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut failures = 0;
    for (url, result) in results {
        match result {
            Ok(response) if json => {
                println!("{}", serde_json::to_string_pretty(&response.article)?);
            }
            Ok(response) => {
                print_response(&response);
                println!();
            }
            Err(e) => {
                failures += 1;
                error!("❌ {}: {}", url, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} article(s) failed", failures, total);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app = NewsSummarizer::from_settings(cli.settings())
        .await
        .context("failed to initialise the summarizer")?;

    match cli.command {
        Commands::Summarize {
            urls,
            force_refresh,
            words,
            concurrency,
            json,
        } => summarize(&app, urls, force_refresh, words, concurrency, json).await?,
        Commands::List { limit, json } => {
            let articles = app.store().list(Some(limit)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&articles)?);
            } else if articles.is_empty() {
                println!("No cached articles yet");
            } else {
                for article in &articles {
                    print_article_line(article);
                }
            }
        }
        Commands::Stats => print_stats(&app.store().stats().await?),
        Commands::Clear { yes } => {
            let total = app.store().stats().await?.total;
            if total == 0 {
                println!("Cache is already empty");
            } else if yes || confirm(&format!("Delete all {} cached articles?", total))? {
                let deleted = app.store().clear().await?;
                info!("🗑️ Deleted {} cached articles", deleted);
                println!("Deleted {} articles", deleted);
            } else {
                println!("Aborted");
            }
        }
        Commands::Sources => {
            for (name, domain) in app.scrapers().domains() {
                println!("{:<14} {}", name, domain);
            }
        }
        Commands::Serve { addr } => {
            let state = nsum_web::AppState::new(Arc::new(app));
            nsum_web::serve(addr, state).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from([
            "nsum",
            "--storage",
            "memory",
            "--backend",
            "dummy",
            "summarize",
            "https://www.naharnet.com/stories/en/1",
            "--force-refresh",
            "--words",
            "50",
        ])
        .unwrap();

        assert_eq!(cli.storage, StorageKind::Memory);
        assert_eq!(cli.backend, ModelBackend::Dummy);
        match cli.command {
            Commands::Summarize {
                urls,
                force_refresh,
                words,
                ..
            } => {
                assert_eq!(urls, vec!["https://www.naharnet.com/stories/en/1"]);
                assert!(force_refresh);
                assert_eq!(words, 50);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["nsum", "--backend", "gpt", "stats"]).is_err());
    }

    #[test]
    fn test_settings_carry_flags() {
        let cli = Cli::try_parse_from([
            "nsum",
            "--backend",
            "ollama",
            "--model-url",
            "http://gpu-box:11434",
            "--database",
            "/tmp/news.db",
            "list",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.inference.backend, ModelBackend::Ollama);
        assert_eq!(settings.inference.endpoint.as_deref(), Some("http://gpu-box:11434"));
        assert_eq!(settings.database.as_deref(), Some("/tmp/news.db"));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("a long headline here", 6), "a long...");
    }
}
