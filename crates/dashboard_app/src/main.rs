//! `bakery-admin`: terminal client for the bakery marketplace dashboard.
//!
//! ```bash
//! bakery-admin stats
//! bakery-admin list orders --url '/dashboard/orders?order_status=PENDING.SHIPPING'
//! bakery-admin show orders o-123
//! bakery-admin browse cakes
//! ```

mod platform;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dashboard_core::AppState;
use dashboard_engine::{EngineHandle, ReqwestBackend, Resource};

use platform::app::{run_browse, BrowseOptions};
use platform::config::{AppConfig, DEFAULT_CONFIG_FILE};
use platform::effects::{EffectRunner, Loaded};
use platform::logging::{self, level_for_verbosity, LogSettings};
use platform::render::{render_dashboard, render_detail_page, render_table_page};
use platform::tables::table_config;

/// Slack on top of the HTTP timeout before a one-shot command gives up.
const WAIT_SLACK: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "bakery-admin")]
#[command(about = "Bakery marketplace administration dashboard", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the RON configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Backend base URL (overrides config and BAKERY_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of a resource table
    List {
        #[arg(value_name = "RESOURCE", value_parser = parse_resource)]
        resource: Resource,

        /// Dashboard location carrying page, sort, search and filters
        #[arg(long, value_name = "LOCATION")]
        url: Option<String>,
    },

    /// Print the detail page of one record
    Show {
        #[arg(value_name = "RESOURCE", value_parser = parse_resource)]
        resource: Resource,

        #[arg(value_name = "ID")]
        id: String,
    },

    /// Print the sales analytics overview
    Stats,

    /// Browse a resource table interactively
    Browse {
        #[arg(value_name = "RESOURCE", value_parser = parse_resource)]
        resource: Resource,

        /// Start here instead of the saved view
        #[arg(long, value_name = "LOCATION")]
        url: Option<String>,
    },
}

fn parse_resource(raw: &str) -> Result<Resource, String> {
    Resource::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Resource::ALL.iter().map(|r| r.as_str()).collect();
        format!("unknown resource {raw:?}; expected one of {}", known.join(", "))
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    logging::initialize(&LogSettings {
        destination: config.log,
        level: level_for_verbosity(cli.verbose),
        file: config.log_file.clone(),
    });

    let mut settings = config.api_settings();
    if let Some(api_url) = cli.api_url {
        settings.base_url = api_url;
    }
    let wait = settings.request_timeout + WAIT_SLACK;
    let backend = ReqwestBackend::new(settings).context("could not build the HTTP client")?;
    let engine = EngineHandle::new(Arc::new(backend), config.session())
        .context("could not start the load engine")?;

    match cli.command {
        Commands::List { resource, url } => {
            let location = url.unwrap_or_else(|| resource.dashboard_path());
            let state = AppState::new(table_config(resource), &location);
            let mut runner = EffectRunner::new(engine, resource);
            runner.load_location(&state.table().location());
            match runner.wait(wait) {
                Some(Loaded::Table(outcome)) => {
                    let view = state.view();
                    print!(
                        "{}",
                        render_table_page(&view.table, state.table().config(), &outcome)
                    );
                }
                _ => bail!("timed out loading {resource}"),
            }
        }
        Commands::Show { resource, id } => {
            let mut runner = EffectRunner::new(engine, resource);
            runner.load_detail(resource, &id);
            match runner.wait(wait) {
                Some(Loaded::Detail(outcome)) => print!("{}", render_detail_page(&outcome)),
                _ => bail!("timed out loading {resource} {id}"),
            }
        }
        Commands::Stats => {
            let mut runner = EffectRunner::new(engine, Resource::Orders);
            runner.load_dashboard();
            match runner.wait(wait) {
                Some(Loaded::Dashboard(data)) => print!("{}", render_dashboard(&data)),
                _ => bail!("timed out loading the dashboard"),
            }
        }
        Commands::Browse { resource, url } => {
            run_browse(
                engine,
                BrowseOptions {
                    resource,
                    views_dir: config.views_dir.clone(),
                    location: url,
                },
            )?;
        }
    }
    Ok(())
}
