use anyhow::{anyhow, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use events_info::config::EventsInfoConfig;
use events_info::EventsInfo;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const API_PREFIX: &str = "/api/v1";
const EVENTS_MODULE: &str = "events_info";
const INGRESS_MODULE: &str = "api_ingress";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Only SQLite is compiled in.
fn ensure_sqlite(cfg: &DatabaseConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    if raw.eq_ignore_ascii_case("sqlite::memory:") || raw.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok(());
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;
    match url.scheme() {
        "sqlite" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// EventHub Server - events and attendees over HTTP
#[derive(Parser)]
#[command(name = "eventhub-server")]
#[command(about = "EventHub Server - events and attendees over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Apply or roll back database migrations
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateDirection {
    /// Apply all pending migrations
    Up,
    /// Roll back all applied migrations
    Down,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("EventHub Server starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
        Commands::Migrate { direction } => migrate(config, direction).await,
    }
}

async fn connect_db(config: &AppConfig) -> Result<DatabaseConnection> {
    // No database section means the built-in sqlite file under home_dir
    let db_config = config
        .database
        .clone()
        .or_else(|| AppConfig::default().database)
        .ok_or_else(|| anyhow!("No database configuration found"))?;
    ensure_sqlite(&db_config)?;

    // Relative sqlite paths live under home_dir
    let base_dir = PathBuf::from(&config.server.home_dir);
    let dsn = absolutize_sqlite_dsn(db_config.url.trim(), &base_dir, true)?;

    let is_memory = dsn == "sqlite::memory:";
    let busy_timeout = Duration::from_millis(u64::from(db_config.busy_timeout_ms.unwrap_or(5000)));
    let connect_opts = SqliteConnectOptions::from_str(&dsn)
        .with_context(|| format!("Invalid SQLite DSN {dsn}"))?
        .create_if_missing(true)
        .busy_timeout(busy_timeout);

    let base = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
    let pool_opts = if is_memory {
        // A single connection that never recycles holds the whole database
        base
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        base.max_connections(db_config.max_conns.unwrap_or(10))
    };

    tracing::info!("Connecting to database: {}", dsn);
    let pool = pool_opts
        .connect_with(connect_opts)
        .await
        .with_context(|| format!("Failed to connect to database {dsn}"))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let events_cfg: EventsInfoConfig = config.module_config(EVENTS_MODULE)?;
    let ingress_cfg: ApiIngressConfig = config.module_config(INGRESS_MODULE)?;

    let db = connect_db(&config).await?;
    EventsInfo::migrate(&db).await?;

    let events = EventsInfo::new(db, events_cfg)?;
    let ingress = ApiIngress::new(ingress_cfg);

    let openapi = ingress.config().enable_docs.then(EventsInfo::openapi);
    let app = axum::Router::new().nest(API_PREFIX, events.router());
    let router = ingress.build_router(app, openapi)?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        match modkit::wait_for_shutdown().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Signal handler failed: {e:#}"),
        }
        trigger.cancel();
    });

    ingress.serve(router, &config.bind_addr(), cancel).await?;
    tracing::info!("EventHub Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let events_cfg: EventsInfoConfig = config.module_config(EVENTS_MODULE)?;
    let _: ApiIngressConfig = config.module_config(INGRESS_MODULE)?;
    if events_cfg.uses_default_secret() {
        println!("warning: modules.events_info.jwt_secret is not set");
    }
    if let Some(db) = &config.database {
        ensure_sqlite(db)?;
    }
    config
        .bind_addr()
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("Invalid bind address '{}'", config.bind_addr()))?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

async fn migrate(config: AppConfig, direction: MigrateDirection) -> Result<()> {
    let db = connect_db(&config).await?;
    match direction {
        MigrateDirection::Up => EventsInfo::migrate(&db).await?,
        MigrateDirection::Down => EventsInfo::rollback(&db).await?,
    }
    println!("Migrations applied");
    Ok(())
}
