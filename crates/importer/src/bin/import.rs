use chrono::Utc;
use clap::{Parser, Subcommand};
use importer::{
    HttpFetcher, Pacing, ScrapeConfig, ScrapeReport, SyncConfig, SyncManager, Synthesizer,
    UnstopScraper,
    config::{DEFAULT_CARD_LIMIT, DEFAULT_OUTPUT_PATH, DEFAULT_SIMPLE_OUTPUT_PATH},
    output,
    synthesizer::Catalogue,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use storage::{Database, models::HackathonRecord, services};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hackathon-import")]
#[command(about = "Hackathon listing scraper and database sync", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the listing and write the JSON files
    Scrape {
        #[command(flatten)]
        scrape: ScrapeArgs,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        #[arg(long, default_value = DEFAULT_SIMPLE_OUTPUT_PATH)]
        simple: PathBuf,
    },
    /// Reconcile a scraped JSON file with the database
    Sync {
        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        input: PathBuf,
    },
    /// Scrape then sync without the intermediate file
    Run {
        #[command(flatten)]
        scrape: ScrapeArgs,
    },
    /// Move one hackathon to the trash
    Trash { id: Uuid },
    /// Delete trash entries past their retention
    PurgeTrash,
    /// Recompute every stored status
    RefreshStatus,
}

#[derive(clap::Args)]
struct ScrapeArgs {
    #[arg(long, default_value_t = DEFAULT_CARD_LIMIT)]
    limit: usize,

    #[arg(long)]
    no_delay: bool,
}

impl ScrapeArgs {
    fn config(&self) -> ScrapeConfig {
        ScrapeConfig {
            card_limit: self.limit,
            pacing: if self.no_delay {
                Pacing::none()
            } else {
                Pacing::default()
            },
            ..ScrapeConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tokio::select! {
        result = dispatch(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, stopping");
            Ok(())
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = cli.database_url;

    match cli.command {
        Commands::Scrape {
            scrape,
            output,
            simple,
        } => {
            let report = handle_scrape(&scrape).await?;
            output::write_records(&output, &report.records).await?;
            output::write_summaries(&simple, &report.records).await?;
        }
        Commands::Sync { input } => {
            let config = SyncConfig {
                input,
                ..SyncConfig::default()
            };
            let records = match output::load_records(&config.input).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("Could not load {}: {}", config.input.display(), e);
                    return Ok(());
                }
            };
            let db = connect(database_url.as_deref()).await?;
            let result = handle_sync(&db, records, config).await;
            db.close().await;
            result?;
        }
        Commands::Run { scrape } => {
            let db = connect(database_url.as_deref()).await?;
            let result = match handle_scrape(&scrape).await {
                Ok(report) => handle_sync(&db, report.records, SyncConfig::default()).await,
                Err(e) => Err(e),
            };
            db.close().await;
            result?;
        }
        Commands::Trash { id } => {
            let db = connect(database_url.as_deref()).await?;
            let result = handle_trash(&db, id).await;
            db.close().await;
            result?;
        }
        Commands::PurgeTrash => {
            let db = connect(database_url.as_deref()).await?;
            let result = handle_purge(&db).await;
            db.close().await;
            result?;
        }
        Commands::RefreshStatus => {
            let db = connect(database_url.as_deref()).await?;
            let result = handle_refresh(&db).await;
            db.close().await;
            result?;
        }
    }

    Ok(())
}

async fn handle_scrape(args: &ScrapeArgs) -> Result<ScrapeReport, Box<dyn std::error::Error>> {
    let config = args.config();
    let fetcher = HttpFetcher::new(&config)?;
    let scraper = UnstopScraper::new(fetcher, Synthesizer::new(Catalogue::standard()), config)?;

    let mut rng = StdRng::from_os_rng();
    let report = scraper.scrape(Utc::now(), &mut rng).await;

    tracing::info!(
        "Collected {} hackathons ({:?}, {} cards found, {} skipped)",
        report.records.len(),
        report.source,
        report.cards_found,
        report.cards_failed
    );
    for record in report.records.iter().take(3) {
        tracing::info!(
            "  {} | {} | {}",
            record.title,
            record.location.venue(),
            record.schedule.start_date().format("%Y-%m-%d")
        );
    }

    Ok(report)
}

async fn handle_sync(
    db: &Database,
    records: Vec<HackathonRecord>,
    config: SyncConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = SyncManager::new(Arc::new(db.hackathons()), config);
    let report = manager.sync(records, Utc::now()).await?;
    report.log_summary();
    Ok(())
}

async fn handle_trash(db: &Database, id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    let trashed =
        services::move_to_trash(&db.hackathons(), id, Utc::now(), SyncConfig::default().trash)
            .await?;
    tracing::info!(
        "Moved '{}' to trash until {}",
        trashed.hackathon.record.title,
        trashed.auto_delete_after
    );
    Ok(())
}

async fn handle_purge(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let purged = services::purge_trash(&db.hackathons(), Utc::now()).await?;
    tracing::info!("Purged {} expired trash entries", purged);
    Ok(())
}

async fn handle_refresh(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let sweep = services::refresh_statuses(&db.hackathons(), Utc::now()).await?;
    tracing::info!(
        "Checked {} hackathons: {} changed, {} failed",
        sweep.checked,
        sweep.changed,
        sweep.failed
    );
    Ok(())
}

/// Connects and migrates. Callers close the pool once their command is done.
async fn connect(database_url: Option<&str>) -> Result<Database, Box<dyn std::error::Error>> {
    let database_url = database_url.ok_or("DATABASE_URL is required for this command")?;

    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;
    tracing::info!("Database connection established");

    Ok(db)
}
