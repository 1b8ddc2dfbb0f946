use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use cms_router::config::{load_config, RouterConfig};
use cms_router::content::{ContentApi, InMemoryContent, SiteFixture, TimeoutContent};
use cms_router::observability::logging;
use cms_router::routing::{DispatchOptions, Dispatcher, RouteOutcome, RouterContext};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Resolve CMS paths against a site fixture", long_about = None)]
struct Cli {
    /// Router configuration (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site fixture (TOML) with sites, pages, posts, taxonomies and aliases.
    #[arg(short, long)]
    fixture: PathBuf,

    /// Site to resolve against. Defaults to the first site in the fixture.
    #[arg(short, long)]
    site: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path
    Resolve {
        path: String,

        /// Return unpublished content too
        #[arg(long)]
        preview: bool,

        /// Query string of the original request, appended to the rewrite
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the site's page hierarchy
    Sitemap,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    logging::init(&config.observability);

    let store = InMemoryContent::from_fixture(SiteFixture::load(&cli.fixture)?);
    let site_id = match cli.site {
        Some(id) => id,
        None => store
            .site_ids()
            .into_iter()
            .next()
            .ok_or("fixture declares no sites")?,
    };

    let content: Arc<dyn ContentApi> = match config.facade.timeout_ms {
        Some(ms) => Arc::new(TimeoutContent::new(store, Duration::from_millis(ms))),
        None => Arc::new(store),
    };

    tracing::info!(site_id = %site_id, fixture = ?cli.fixture, "Fixture loaded");
    let dispatcher = Dispatcher::new(RouterContext::new(content, Arc::new(config)));

    match cli.command {
        Commands::Resolve { path, preview, query } => {
            let outcome = dispatcher
                .resolve_with(&path, site_id, DispatchOptions { preview })
                .await?;
            let mut json = serde_json::to_value(&outcome)?;
            if let (RouteOutcome::Route(target), Some(map)) = (&outcome, json.as_object_mut()) {
                map.insert(
                    "rewrite_url".to_string(),
                    target.rewrite_url(query.as_deref()).into(),
                );
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Sitemap => {
            let sitemap = dispatcher.sitemap(site_id).await?;
            println!("{}", serde_json::to_string_pretty(&sitemap)?);
        }
    }

    Ok(())
}
