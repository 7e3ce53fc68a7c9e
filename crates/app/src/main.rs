use anyhow::Context;
use catalog_discover_core::{
    AskClient, PanelSurface, RagMode, ResultsView, SearchOutcome, SearchPanel,
    NO_MATCHES_MESSAGE,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog-discover", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Discovery backend base URL
    #[arg(long, default_value = "http://localhost:8000", env = "DISCOVER_API_URL")]
    api_url: String,
}

#[derive(Subcommand)]
enum Command {
    /// Send one question to the backend and print the rendered result.
    Ask {
        /// Question text; surrounding whitespace is ignored, an empty
        /// question sends nothing.
        #[arg(long)]
        query: String,
        /// RAG strategy: auto, standard, corrective, speculative, fusion.
        #[arg(long, default_value = "auto")]
        mode: RagMode,
        /// Also write the rendered HTML regions to this file.
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// List the available RAG strategies.
    Modes,
    /// Check that the backend is reachable.
    Health,
}

/// Terminal stand-in for the original search page: the loader becomes a log
/// line, alerts go to stderr, and the rendered view is printed after the
/// search settles.
#[derive(Default)]
struct TerminalSurface {
    view: Option<ResultsView>,
    alert: Option<String>,
}

impl PanelSurface for TerminalSurface {
    fn show_loader(&mut self) {
        info!("searching the catalog...");
    }

    fn hide_loader(&mut self) {}

    fn clear_results(&mut self) {
        self.view = None;
        self.alert = None;
    }

    fn render(&mut self, view: ResultsView) {
        self.view = Some(view);
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

fn print_view(view: &ResultsView) {
    println!("{}", view.answer_markdown);
    println!();
    let badge_line = view
        .badges
        .iter()
        .map(|badge| format!("[{}]", badge.text))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{badge_line}");
    println!("generated in {}", view.timing);
    println!();

    if view.cards.is_empty() {
        println!("{NO_MATCHES_MESSAGE}");
        return;
    }
    for card in &view.cards {
        println!("- {} ({})", card.meta, card.src);
        println!("  {}", card.caption);
        if let Some(link) = &card.link {
            println!("  {link}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        api_url = %cli.api_url,
        "catalog-discover boot"
    );

    match cli.command {
        Command::Ask { query, mode, html } => {
            let client = AskClient::new(&cli.api_url)?;
            let panel = SearchPanel::new(client);
            let mut surface = TerminalSurface::default();

            match panel.perform_search(&query, mode, &mut surface).await {
                SearchOutcome::Skipped => println!("empty query, nothing sent"),
                SearchOutcome::Rendered => {
                    if let Some(view) = &surface.view {
                        print_view(view);
                        if let Some(path) = html {
                            std::fs::write(&path, view.to_html())
                                .with_context(|| format!("writing {}", path.display()))?;
                            println!();
                            println!("html written to {}", path.display());
                        }
                    }
                }
                SearchOutcome::Failed => {
                    let alert = surface.alert.unwrap_or_default();
                    anyhow::bail!(alert);
                }
                // A single CLI search has nothing to race against.
                SearchOutcome::Stale => {}
            }
        }
        Command::Modes => {
            for mode in RagMode::ALL {
                println!("{:<12} {}", mode.as_str(), mode.label());
                println!("{:<12} {}", "", mode.description());
            }
        }
        Command::Health => {
            let client = AskClient::new(&cli.api_url)?;
            let health = client.health().await?;
            println!(
                "status={} engine={}",
                health.status,
                health.engine.as_deref().unwrap_or("unknown")
            );
        }
    }

    Ok(())
}
