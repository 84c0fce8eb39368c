use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use siteview::api::models::SiteResponse;
use siteview::api::{AppState, create_router};
use siteview::config::CONFIG;
use siteview::controller::{Msg, ResultViewState, ResultsController, Status};
use siteview::fetcher::ManifestFetcher;
use siteview::views::resolve_link;

#[derive(Parser, Debug)]
#[command(name = "siteview", version, about = "Explore a site.json manifest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the search page and JSON API
    Serve {
        #[arg(long, help = "Address to bind (defaults to SITEVIEW_BIND_ADDR)")]
        bind: Option<String>,
    },
    /// Fetch a site once and print its summary and items
    Show {
        url: String,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Also captures `log` records from the library and reqwest.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let fetcher = ManifestFetcher::from_config().context("failed to build http client")?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let router = create_router(AppState::new(fetcher, CONFIG.ui.clone()));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!("listening on http://{addr}");
            axum::serve(listener, router).await?;
        }
        Commands::Show { url, json } => {
            let mut controller = ResultsController::new(fetcher);
            let state = controller.dispatch(Msg::Search(url)).await;
            if json {
                let response = SiteResponse::from_state(state, &CONFIG.ui.default_logo, 0);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_state(state);
            }
            if state.status == Status::Error {
                bail!(
                    "{}",
                    state.error_message.as_deref().unwrap_or("failed to load site")
                );
            }
        }
    }
    Ok(())
}

fn print_state(state: &ResultViewState) {
    let Some(summary) = state.summary(&CONFIG.ui.default_logo) else {
        return;
    };
    println!("{}", summary.name);
    if !summary.description.is_empty() {
        println!("{}", summary.description);
    }
    for (label, value) in [
        ("theme", &summary.theme),
        ("created", &summary.creation_date),
        ("updated", &summary.last_updated),
    ] {
        if !value.is_empty() {
            println!("  {label}: {value}");
        }
    }
    println!();

    for card in state.cards() {
        println!("- {} {}", card.heading, card.last_updated);
        if !card.description.is_empty() {
            println!("    {}", card.description);
        }
        if !card.index_link.is_empty() {
            let link = resolve_link(&card.index_link, state.site_root.as_ref());
            println!("    {link}");
        }
    }
}
