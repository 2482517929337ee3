use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use newsroom_ssr::api::{ApiClient, BlogApi};
use newsroom_ssr::config;
use newsroom_ssr::page::{PageOutcome, PageResolver};
use newsroom_ssr::sitemap;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a path segment and print the page props and metadata as JSON
    Resolve { slug: String },
    /// Print the rendered <head> fragment for a path segment
    Head { slug: String },
    /// Print the sitemap XML
    Sitemap,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let client = ApiClient::from_config(&cfg)?;
    info!(?client, "content API client ready");

    match args.command {
        Command::Resolve { slug } => {
            let resolver = PageResolver::new(client, &cfg);
            let outcome = resolver.resolve(&slug).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if let PageOutcome::Found(page) = &outcome {
                if let Some(cache) = page.cache_control() {
                    info!(cache_control = %cache, "suggested cache policy");
                }
                Ok(ExitCode::SUCCESS)
            } else {
                warn!(%slug, "not found");
                Ok(ExitCode::from(2))
            }
        }
        Command::Head { slug } => {
            let resolver = PageResolver::new(client, &cfg);
            let metadata = resolver.metadata(&slug).await;
            print!("{}", metadata.to_head_html());
            Ok(ExitCode::SUCCESS)
        }
        Command::Sitemap => {
            let base = cfg.public_base_url();
            let categories = client
                .categories()
                .await
                .context("failed to fetch categories")?;
            let posts = sitemap::collect_published_posts(&client, cfg.api.posts_limit).await?;
            let top_level = categories
                .iter()
                .filter(|c| c.is_top_level())
                .count();
            info!(categories = top_level, posts = posts.len(), "rendering sitemap");
            print!("{}", sitemap::render(&base, &categories, &posts));
            Ok(ExitCode::SUCCESS)
        }
    }
}
