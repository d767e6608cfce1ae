mod config;
mod http;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::seed::{EmployeeSeeder, SeedConfig};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employees-server", version, about = "Employee management backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the REST API server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Generate fixture employees and write their credentials to JSON.
    Seed(SeedCommand),
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct SeedCommand {
    /// Number of employees to generate (defaults to SEED_COUNT or 1000).
    #[arg(long)]
    count: Option<usize>,
    /// Records per insert transaction (defaults to SEED_BATCH_SIZE or 250).
    #[arg(long)]
    batch_size: Option<usize>,
    /// Credentials file (defaults to USER_DETAILS_PATH or user_details.json).
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Append to existing rows instead of clearing them first.
    #[arg(long)]
    keep_existing: bool,
}

impl SeedCommand {
    fn apply(self, mut config: SeedConfig) -> SeedConfig {
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.clear_existing = !self.keep_existing;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up(&app_config).await,
            MigrateCommand::Down => migrate_down(&app_config).await,
        },
        Command::Seed(cmd) => {
            let pool = setup_pool(&app_config).await?;
            ensure_migrations(&pool, false).await?;
            run_seed(&pool, cmd.apply(app_config.seed.clone())).await
        }
    }
}

async fn setup_pool(config: &AppConfig) -> Result<DbPool> {
    connect(&config.database).await.map_err(Into::into)
}

async fn run_seed(pool: &DbPool, config: SeedConfig) -> Result<()> {
    let report = EmployeeSeeder::new(config, StdRng::from_entropy())
        .run(pool)
        .await?;
    info!(
        seeded = report.seeded,
        batches = report.batches,
        output = %report.output.display(),
        "seed finished"
    );
    Ok(())
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool(&config).await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    if config.seed_on_start {
        run_seed(&pool, config.seed.clone()).await?;
    } else {
        info!("employee seeding skipped (SEED_EMPLOYEES is not set)");
    }
    let state = AppState {
        pool,
        config: config.clone(),
    };
    http::serve((&cmd).into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `cargo run -p server -- migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}
