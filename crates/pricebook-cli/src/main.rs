use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod extract;

#[derive(Debug, Parser)]
#[command(name = "pricebook")]
#[command(about = "Extract price, title, image and description from product pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a product page and extract it
    Extract {
        /// Absolute http(s) URL of the product page
        url: String,
        /// Never escalate to the rendering service
        #[arg(long)]
        no_render: bool,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Extract from an HTML file already on disk (`-` reads stdin)
    Parse {
        file: PathBuf,
        /// URL the page was served from; enables site rules and absolute image links
        #[arg(long)]
        url: Option<String>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Parse one free-form price string
    Price { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pricebook_core::load_app_config()?;

    // Logs go to stderr so stdout stays pipeable JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, render = config.render_enabled(), "configuration loaded");

    match cli.command {
        Some(Commands::Extract {
            url,
            no_render,
            compact,
        }) => extract::run_extract(&config, &url, no_render, compact).await?,
        Some(Commands::Parse { file, url, compact }) => {
            extract::run_parse(&file, url.as_deref(), compact)?;
        }
        Some(Commands::Price { text }) => extract::run_price(&text)?,
        None => println!("pricebook: no command given, see --help"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
