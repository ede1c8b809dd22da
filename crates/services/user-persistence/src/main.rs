//! User Persistence - CLI for saving users through a configurable store.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::User;
use user_persistence_lib::config::{StoreBackend, UserPersistenceConfig};
use user_persistence_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-persistence")]
#[command(about = "Save users through a pluggable store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save one user
    Save {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// Store backend: memory, file or database (overrides USER_STORE_BACKEND)
        #[arg(long)]
        backend: Option<String>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Save {
            id,
            email,
            name,
            backend,
        } => {
            let config = match backend {
                Some(backend) => {
                    UserPersistenceConfig::from_env_with_backend(backend.parse::<StoreBackend>()?)
                }
                None => UserPersistenceConfig::from_env()?,
            };
            let user = User::new(id, email, name);

            if let Err(err) = user_persistence_lib::run_save(&config, &user).await {
                eprintln!("{}", user_persistence_lib::describe_failure(&err));
                std::process::exit(1);
            }
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            let database = UserPersistenceConfig::database_from_env();
            user_persistence_lib::run_migrations(&database, migrate_action).await?;
        }
    }

    Ok(())
}
