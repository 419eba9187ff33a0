mod render;
mod session;

use clap::{Parser, Subcommand};
use storemap_core::AppConfig;
use storemap_locator::{
    load_catalog, AppState, CatalogFetchOptions, CatalogSource, Command, ConfiguredProvider,
    Slot,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storemap")]
#[command(about = "Store locator: browse, filter and route between store locations")]
struct Cli {
    /// Catalog file path or URL (overrides STOREMAP_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every marker grouped by category
    List,
    /// Show only markers of one category ("all" shows everything)
    Filter {
        /// Category name, matched case-insensitively
        key: String,
    },
    /// Geocode an address and add it as a custom marker
    Geocode {
        #[arg(long)]
        address: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Request driving directions between two markers
    Route {
        /// Origin marker key ("lat,lng")
        #[arg(long)]
        origin: String,
        /// Destination marker key ("lat,lng")
        #[arg(long)]
        destination: String,
    },
    /// Interactive session reading one command per line from stdin
    Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = storemap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut app = build_state(&config, cli.catalog.as_deref()).await?;

    match cli.command {
        Some(Commands::List) | None => render::print_listing(&app, cli.json)?,
        Some(Commands::Filter { key }) => {
            app.dispatch(Command::Filter(key)).await;
            render::print_visible(&app, cli.json)?;
        }
        Some(Commands::Geocode {
            address,
            title,
            description,
        }) => {
            app.dispatch(Command::AddMarker {
                address,
                title,
                description,
            })
            .await;
            render::print_notifications(&mut app);
            render::print_listing(&app, cli.json)?;
        }
        Some(Commands::Route {
            origin,
            destination,
        }) => {
            app.dispatch(Command::Select(Slot::Origin, Some(origin)))
                .await;
            app.dispatch(Command::Select(Slot::Destination, Some(destination)))
                .await;
            app.dispatch(Command::RequestRoute).await;
            render::print_notifications(&mut app);
            render::print_route(&app, cli.json)?;
        }
        Some(Commands::Session) => session::run(&mut app, cli.json).await?,
    }

    Ok(())
}

/// Load the catalog (soft-failing to empty) and pick the map provider.
async fn build_state(
    config: &AppConfig,
    catalog_override: Option<&str>,
) -> anyhow::Result<AppState<ConfiguredProvider>> {
    let source = CatalogSource::parse(catalog_override.unwrap_or(&config.catalog_source));
    let options = CatalogFetchOptions {
        timeout_secs: config.request_timeout_secs,
        user_agent: config.user_agent.clone(),
    };
    let catalog = load_catalog(&source, &options).await;

    let provider = ConfiguredProvider::from_config(config)?;
    let (app, report) = AppState::with_catalog(provider, &catalog);
    if report.skipped_stores > 0 || report.skipped_locations > 0 {
        tracing::warn!(
            skipped_stores = report.skipped_stores,
            skipped_locations = report.skipped_locations,
            "some catalog entries were skipped"
        );
    }
    Ok(app)
}

#[cfg(test)]
mod tests;
