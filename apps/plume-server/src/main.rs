use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use auth::contract::client::AuthApi;
use runtime::{AppConfig, CliArgs, DatabaseConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Plume - revisioned notes service
#[derive(Parser)]
#[command(name = "plume-server")]
#[command(about = "Plume - revisioned notes service")]
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

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Plume server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory,
/// keeping "sqlite::memory:" as-is. Relative sqlite paths otherwise depend
/// on the process cwd.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
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
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

async fn connect_database(cfg: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    let mut dsn = cfg.url.trim().to_owned();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    if dsn.starts_with("sqlite:") {
        dsn = absolutize_sqlite_dsn(&dsn, base_dir)?;
    }

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.max_connections(cfg.max_conns.unwrap_or(10))
        .acquire_timeout(Duration::from_secs(5));

    tracing::info!("Connecting to database: {}", dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database at {dsn}"))
}

/// Assemble the application router: identity gate routes, notes routes, and
/// the shared AuthApi extension the caller extractor resolves tokens through.
fn build_router(config: &AppConfig, db: DatabaseConnection) -> Result<axum::Router> {
    let auth_cfg: auth::config::AuthConfig = config
        .module_config("auth")?
        .unwrap_or_default();
    let notes_cfg: notes::config::NotesConfig = config
        .module_config("notes")?
        .unwrap_or_default();

    let auth_service = Arc::new(auth::domain::service::Service::new(
        Arc::new(auth::infra::storage::sea_orm_repo::SeaOrmUsersRepository::new(db.clone())),
        auth::domain::service::ServiceConfig {
            min_password_length: auth_cfg.min_password_length,
            max_username_length: auth_cfg.max_username_length,
        },
    ));
    let notes_service = Arc::new(notes::domain::service::Service::new(
        Arc::new(notes::infra::storage::sea_orm_repo::SeaOrmNotesRepository::new(db)),
        notes::domain::service::ServiceConfig {
            max_title_length: notes_cfg.max_title_length,
        },
    ));

    let auth_client: Arc<dyn AuthApi> =
        Arc::new(auth::gateways::local::AuthLocalClient::new(auth_service.clone()));

    Ok(auth::api::rest::routes::router(auth_service)
        .merge(notes::api::rest::routes::router(notes_service))
        .layer(axum::Extension(auth_client)))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let base_dir = PathBuf::from(&config.server.home_dir);
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;

    let db = connect_database(&db_config, &base_dir).await?;
    auth::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("Failed to run auth migrations")?;
    notes::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("Failed to run notes migrations")?;

    let app = build_router(&config, db)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!("Shutdown signal listener failed: {e}");
            }
            tracing::info!("Shutting down");
        })
        .await
        .context("Server error")
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load_* already normalized & created home_dir
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?; // Ctrl+C
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
            _ = tokio::signal::ctrl_c() => {}, // fallback
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}
