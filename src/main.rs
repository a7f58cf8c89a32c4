use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod aggregator;
mod client;
mod config;
mod export;
mod fallback;
mod format;
mod models;
mod render;
mod report;
mod summary;
#[cfg(test)]
mod test_support;

use aggregator::{load_view, CancelToken, Origin, ViewModel, ViewState};
use client::ApiClient;
use config::Settings;
use export::Table;
use models::{DashboardData, HomeData};
use render::Tab;

#[derive(Parser)]
#[command(name = "mark-dashboard")]
#[command(about = "Marketing analytics and pipeline dashboard for the terminal", long_about = None)]
struct Cli {
    /// API base URL (defaults to MARK_API_BASE_URL, then http://localhost:8000)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Per-request timeout in seconds; 0 disables it
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Show an error banner instead of sample data when the API is unreachable
    #[arg(long, global = true)]
    no_fallback: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewKind {
    Dashboard,
    Home,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the data/AI pipeline dashboard
    Dashboard {
        #[arg(long, value_enum, default_value_t = Tab::Overview)]
        tab: Tab,
    },
    /// Show news, trends, goals and AI feedback
    Home,
    /// Re-poll a view on an interval until interrupted
    Watch {
        #[arg(long, value_enum, default_value_t = ViewKind::Dashboard)]
        view: ViewKind,
        #[arg(long, value_enum, default_value_t = Tab::Overview)]
        tab: Tab,
        #[arg(long, default_value_t = 30)]
        interval_secs: u64,
    },
    /// Generate a markdown report covering both views
    Report {
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Write one table as CSV
    Export {
        #[arg(long, value_enum)]
        table: Table,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mark_dashboard=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

const INTERRUPTED_EXIT_CODE: i32 = 130;

/// First interrupt cancels in-flight work; any later one asks for an exit code.
fn handle_interrupt(token: &CancelToken) -> Option<i32> {
    if token.is_cancelled() {
        Some(INTERRUPTED_EXIT_CODE)
    } else {
        token.cancel();
        None
    }
}

/// Cancels `token` on Ctrl-C and exits on a second Ctrl-C.
fn cancel_on_interrupt(token: &CancelToken) {
    let token = token.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if let Some(code) = handle_interrupt(&token) {
                warn!("interrupted again, exiting");
                std::process::exit(code);
            }
        }
    });
}

async fn load_dashboard(
    client: &ApiClient,
    settings: &Settings,
    cancel: &CancelToken,
) -> Option<ViewModel<DashboardData>> {
    eprint!("{}", render::render_loading("dashboard"));
    let state: ViewState<DashboardData> = load_view(
        "dashboard",
        client.fetch_dashboard(),
        cancel,
        settings.failure_policy,
    )
    .await;
    state.into_ready()
}

async fn load_home(
    client: &ApiClient,
    settings: &Settings,
    cancel: &CancelToken,
) -> Option<ViewModel<HomeData>> {
    eprint!("{}", render::render_loading("home"));
    let state: ViewState<HomeData> =
        load_view("home", client.fetch_home(), cancel, settings.failure_policy).await;
    state.into_ready()
}

fn ensure_available<T>(view: &ViewModel<T>) -> anyhow::Result<()> {
    if let Origin::Failed { reason } = &view.origin {
        bail!("no data available: {reason}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.base_url, cli.timeout_secs, cli.no_fallback)
        .context("invalid configuration")?;
    let client = ApiClient::new(&settings).context("failed to build HTTP client")?;
    info!(base_url = %settings.base_url, "using API");

    let cancel = CancelToken::new();
    cancel_on_interrupt(&cancel);

    match cli.command {
        Commands::Dashboard { tab } => {
            let Some(view) = load_dashboard(&client, &settings, &cancel).await else {
                println!("Cancelled.");
                return Ok(());
            };
            print!("{}", render::render_dashboard(&view, tab, &Local));
        }
        Commands::Home => {
            let Some(view) = load_home(&client, &settings, &cancel).await else {
                println!("Cancelled.");
                return Ok(());
            };
            print!("{}", render::render_home(&view, &Local));
        }
        Commands::Watch {
            view,
            tab,
            interval_secs,
        } => {
            let interval = Duration::from_secs(interval_secs.max(1));
            loop {
                let rendered = match view {
                    ViewKind::Dashboard => load_dashboard(&client, &settings, &cancel)
                        .await
                        .map(|v| render::render_dashboard(&v, tab, &Local)),
                    ViewKind::Home => load_home(&client, &settings, &cancel)
                        .await
                        .map(|v| render::render_home(&v, &Local)),
                };
                let Some(rendered) = rendered else { break };

                println!("=== {} ===", Local::now().format("%Y-%m-%d %H:%M:%S"));
                print!("{rendered}");
                println!();

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            println!("Stopped watching.");
        }
        Commands::Report { out } => {
            let (dashboard, home) = tokio::join!(
                load_dashboard(&client, &settings, &cancel),
                load_home(&client, &settings, &cancel),
            );
            let (Some(dashboard), Some(home)) = (dashboard, home) else {
                println!("Cancelled.");
                return Ok(());
            };
            if !dashboard.is_live() || !home.is_live() {
                warn!("report includes data that is not live");
            }

            let report = report::build_report(&dashboard, &home, Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { table, out } => {
            info!(resource = %table.resource(), "exporting table");
            let rows = if table.is_dashboard() {
                let Some(view) = load_dashboard(&client, &settings, &cancel).await else {
                    println!("Cancelled.");
                    return Ok(());
                };
                ensure_available(&view)?;
                match &out {
                    Some(path) => export::export_dashboard(
                        table,
                        &view.data,
                        std::fs::File::create(path)
                            .with_context(|| format!("failed to create {}", path.display()))?,
                    )?,
                    None => export::export_dashboard(table, &view.data, std::io::stdout().lock())?,
                }
            } else {
                let Some(view) = load_home(&client, &settings, &cancel).await else {
                    println!("Cancelled.");
                    return Ok(());
                };
                ensure_available(&view)?;
                match &out {
                    Some(path) => export::export_home(
                        table,
                        &view.data,
                        std::fs::File::create(path)
                            .with_context(|| format!("failed to create {}", path.display()))?,
                    )?,
                    None => export::export_home(table, &view.data, std::io::stdout().lock())?,
                }
            };

            if let Some(path) = &out {
                println!("Exported {rows} rows to {}.", path.display());
            }
        }
    }

    Ok(())
}
