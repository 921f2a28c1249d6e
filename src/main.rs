mod app;
mod config;
mod controller;
mod models;
mod source;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use app::{FolioApp, ViewRequest};
use config::Config;
use ui::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Browse a photography portfolio from its image-listing API")]
struct Cli {
    /// Config file (default: XDG config dir/folio/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Image-listing endpoint, overrides the config
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Read the listing from a saved JSON response instead of the endpoint
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "endpoint")]
    file: Option<PathBuf>,

    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[arg(long, global = true, value_enum)]
    mode: Option<DisplayMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of the portfolio
    Show(ShowArgs),
    /// Page through the portfolio interactively
    Browse {
        /// Shareable portfolio link to start from
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct ShowArgs {
    /// Shareable portfolio link to reproduce
    #[arg(long, conflicts_with_all = ["category", "page", "search"])]
    url: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    page: Option<usize>,

    #[arg(long)]
    search: Option<String>,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(mode) = self.mode {
            config.display_mode = mode;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered pages on stdout stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let app = FolioApp::new(config, cli.file.clone());

    match cli.command.unwrap_or(Commands::Show(ShowArgs::default())) {
        Commands::Show(args) => {
            let request = ViewRequest {
                url: args.url,
                category: args.category,
                page: args.page,
                search: args.search,
            };
            print!("{}", app.show(&request).await?);
        }
        Commands::Browse { url } => app.browse(url.as_deref()).await?,
    }

    Ok(())
}
