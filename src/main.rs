mod emit;
mod parser;
mod pipeline;
mod render;
mod settings;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use emit::JsonEmitter;
use render::{HttpRenderer, SnapshotRenderer};
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "redoc_catalog",
    about = "Extract a canonical endpoint catalog from a rendered API documentation page"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the documentation site and extract its endpoints
    Fetch {
        /// Documentation URL (default: CATALOG_URL or the built-in site)
        #[arg(short, long)]
        url: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Extract endpoints from a page saved after rendering
    Parse {
        /// Rendered HTML file, or "-" for stdin
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Write the catalog here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

impl OutputArgs {
    fn emitter(&self) -> anyhow::Result<JsonEmitter<Box<dyn Write>>> {
        let out: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
            )),
            None => Box::new(io::stdout().lock()),
        };
        Ok(JsonEmitter::new(out, !self.compact))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load().context("Failed to load settings")?;
    let markup = settings.markup().context("Invalid markup selectors")?;

    match cli.command {
        Commands::Fetch { url, output } => {
            if let Some(url) = url {
                settings.url = url;
            }
            let renderer = HttpRenderer::new(&settings, markup.clone())?;
            let mut emitter = output.emitter()?;
            pipeline::run_pipeline(&renderer, &mut emitter, &markup).await?;
        }
        Commands::Parse { input, output } => {
            let renderer = SnapshotRenderer::new(input, markup.clone());
            let mut emitter = output.emitter()?;
            pipeline::run_pipeline(&renderer, &mut emitter, &markup).await?;
        }
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
