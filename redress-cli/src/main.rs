//! Redress Command Line Interface
//!
//! Usage:
//!   redress init              - Initialize the complaint database
//!   redress start             - Start the Redress API server
//!   redress status            - Show service status
//!   redress role grant        - Grant a role to a user
//!   redress role revoke       - Revoke a role from a user
//!   redress role list         - List a user's role assignments
//!
//! The API server reads `REDRESS_JWT_SECRET` (and optionally
//! `REDRESS_JWT_ISSUER`) from the environment. `RUST_LOG` overrides the
//! `--log-level` flag when set.

use clap::{Parser, Subcommand};
use redress_api::{run_server, ApiConfig};
use redress_core::logging::LogLevel;
use redress_core::store::{CategoryStore, RoleStore};
use redress_core::{Role, StoreError};
use redress_db::{CategoryService, Database, DirectoryService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Categories seeded by `redress init --seed`
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Academic", "Courses, grading, and instruction"),
    ("Facilities", "Buildings, classrooms, and equipment"),
    ("Housing", "Dormitories and residential services"),
    ("Dining", "Cafeterias and meal plans"),
    ("Administration", "Registration, fees, and student services"),
    ("Other", "Anything that fits no other category"),
];

#[derive(Parser)]
#[command(name = "redress")]
#[command(about = "Student complaint tracker CLI")]
#[command(version)]
struct Cli {
    /// SQLite database path
    #[arg(long, default_value = "redress.db")]
    db: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the complaint database schema
    Init {
        /// Also seed the default complaint categories
        #[arg(long)]
        seed: bool,
    },

    /// Start the Redress API server
    Start {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Root directory for attachment storage
        #[arg(long, default_value = "storage")]
        storage_root: String,
        /// Notification webhook endpoint (dispatch disabled when absent)
        #[arg(long)]
        notify_endpoint: Option<String>,
        /// Also notify complaint owners when an admin comments
        #[arg(long)]
        notify_on_admin_comment: bool,
        /// Lifetime of signed attachment URLs in seconds
        #[arg(long, default_value = "600")]
        signed_url_ttl: i64,
        /// Disable permissive CORS
        #[arg(long)]
        no_cors: bool,
    },

    /// Show service status
    Status {
        /// API server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        api_url: String,
    },

    /// Manage role assignments
    Role {
        #[command(subcommand)]
        action: RoleCommands,
    },
}

#[derive(Subcommand)]
enum RoleCommands {
    /// Grant a role to a user
    Grant {
        /// User ID (the JWT subject)
        user_id: String,
        /// Role name (student, admin)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// Revoke a role from a user
    Revoke {
        /// User ID
        user_id: String,
        /// Role name (student, admin)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// List a user's role assignments
    List {
        /// User ID
        user_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match LogLevel::parse(&cli.log_level) {
        Some(level) => level,
        None => {
            eprintln!("Unknown log level '{}', using info", cli.log_level);
            LogLevel::default()
        }
    };
    init_logging(level);

    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging with tracing; `RUST_LOG` wins over `--log-level`
fn init_logging(level: LogLevel) {
    let default_filter = format!(
        "redress_api={0},redress_db={0},redress_storage={0},redress_core={0},tower_http=info",
        level.as_str()
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::Init { seed } => {
            println!("Initializing Redress database at {}...", cli.db);

            let db = Database::open(&cli.db)?;
            db.init_schema()?;

            println!("Database schema initialized successfully.");

            if seed {
                let categories = CategoryService::new(&db);
                for (name, description) in DEFAULT_CATEGORIES {
                    match categories.create_category(name, Some(description)).await {
                        Ok(record) => {
                            println!("  seeded category {} ({})", record.name, record.category_id)
                        }
                        Err(StoreError::AlreadyExists(_)) => {
                            println!("  category {} already present", name)
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            Ok(())
        }

        Commands::Start {
            host,
            port,
            storage_root,
            notify_endpoint,
            notify_on_admin_comment,
            signed_url_ttl,
            no_cors,
        } => {
            println!("Starting Redress API server on {}:{}...", host, port);

            let config = ApiConfig {
                host,
                port,
                enable_cors: !no_cors,
                db_path: cli.db,
                storage_root,
                notify_endpoint,
                notify_on_admin_comment,
                signed_url_ttl_secs: signed_url_ttl,
            };

            run_server(config).await?;
            Ok(())
        }

        Commands::Status { api_url } => {
            println!("Checking Redress service status at {}...", api_url);

            let client = reqwest::Client::new();
            let health = client
                .get(format!("{}/health", api_url))
                .send()
                .await?
                .json::<serde_json::Value>()
                .await?;
            let ready = client
                .get(format!("{}/ready", api_url))
                .send()
                .await?
                .json::<serde_json::Value>()
                .await?;

            println!("Health: {}", serde_json::to_string_pretty(&health)?);
            println!("Ready:  {}", serde_json::to_string_pretty(&ready)?);
            Ok(())
        }

        Commands::Role { action } => handle_role_command(action, &cli.db).await,
    }
}

async fn handle_role_command(
    action: RoleCommands,
    db_path: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = Database::open(db_path)?;
    db.init_schema()?;
    let directory = DirectoryService::new(&db);

    match action {
        RoleCommands::Grant { user_id, role } => {
            let role = parse_role(&role)?;
            directory.grant_role(&user_id, role, None).await?;
            println!("Granted {} to {}", role, user_id);
        }
        RoleCommands::Revoke { user_id, role } => {
            let role = parse_role(&role)?;
            directory.revoke_role(&user_id, role).await?;
            println!("Revoked {} from {}", role, user_id);
        }
        RoleCommands::List { user_id } => {
            let roles = directory.roles_for(&user_id).await?;
            if roles.is_empty() {
                println!("{} has no assignments (effective role: student)", user_id);
            } else {
                for role in &roles {
                    println!("{}", role);
                }
            }
        }
    }
    Ok(())
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("Invalid role '{}'. Expected one of: student, admin", s))
}
