/// Version injected at compile time via OMICS_HELPERS_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("OMICS_HELPERS_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use omics_helpers::aws::{AwsClients, Store, StoreKind};
use omics_helpers::config::Config;
use omics_helpers::omics::{self, Pagination, ResourceLinkRequest};
use omics_helpers::{format_error, OmicsError};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Helpers for Amazon Omics
#[derive(Parser, Debug)]
#[command(name = "omics-helpers", version, about, long_about = None)]
struct Args {
    /// AWS profile to use
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// AWS region to use
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an IAM role for Omics workflows unless it already exists
    CreateRole {
        /// Role name
        #[arg(long)]
        role_name: String,
        /// Permission policy document (JSON or YAML)
        #[arg(long)]
        policy_file: PathBuf,
        /// Trust policy document; defaults to trusting the Omics service
        #[arg(long)]
        trust_policy_file: Option<PathBuf>,
    },
    /// Print the ARN of an IAM role
    RoleArn {
        #[arg(long)]
        role_name: String,
    },
    /// Print the id of the region's reference store
    RefStoreId,
    /// Print the ARN of a reference in the region's reference store
    ReferenceArn {
        /// Reference name
        #[arg(long)]
        name: String,
        /// Search every page of references instead of the first
        #[arg(long)]
        all_pages: bool,
    },
    /// Link an analytics store's shared table into a local Glue database
    ResourceLink {
        /// Analytics store name
        #[arg(long)]
        store_name: String,
        /// Analytics store id; looked up by name when omitted
        #[arg(long)]
        store_id: Option<String>,
        /// Kind of store to look up
        #[arg(long, value_enum, default_value = "variant")]
        store_kind: StoreKindArg,
        /// Label used in the shared database name; defaults to the store kind
        #[arg(long)]
        store_type: Option<String>,
        /// Local Glue database to create the link in
        #[arg(long)]
        database: Option<String>,
        /// Search every page of shared resources instead of the first
        #[arg(long)]
        all_pages: bool,
    },
    /// Save default profile, region and database
    Configure {
        #[arg(long)]
        database: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoreKindArg {
    Variant,
    Annotation,
}

impl From<StoreKindArg> for StoreKind {
    fn from(kind: StoreKindArg) -> Self {
        match kind {
            StoreKindArg::Variant => StoreKind::Variant,
            StoreKindArg::Annotation => StoreKind::Annotation,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("omics-helpers {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("omics-helpers").join("omics-helpers.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".omics-helpers").join("omics-helpers.log");
    }
    PathBuf::from("omics-helpers.log")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();

    if let Command::Configure { database } = &args.command {
        if let Some(profile) = &args.profile {
            config.profile = Some(profile.clone());
        }
        if let Some(database) = database {
            config.database = Some(database.clone());
        }
        match &args.region {
            Some(region) => config.set_region(region)?,
            None => config.save()?,
        }
        emit(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let profile = config.effective_profile(args.profile.as_deref());
    let region = config.effective_region(args.region.as_deref());
    tracing::info!("Using profile: {:?}, region: {:?}", profile, region);

    let clients = AwsClients::new(profile.as_deref(), region.as_deref()).await;
    tracing::debug!("Clients configured for region {:?}", clients.region());

    match run(&args.command, &clients, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("Error: {}", format_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(command: &Command, clients: &AwsClients, config: &Config) -> Result<(), OmicsError> {
    match command {
        Command::CreateRole {
            role_name,
            policy_file,
            trust_policy_file,
        } => {
            let policy = omics::load_policy_document(policy_file)
                .map_err(|e| OmicsError::InvalidInput(format!("{:#}", e)))?;
            let trust_policy = match trust_policy_file {
                Some(path) => omics::load_policy_document(path)
                    .map_err(|e| OmicsError::InvalidInput(format!("{:#}", e)))?,
                None => omics::omics_trust_policy(),
            };

            let status = omics::create_omics_role(clients, role_name, &policy, &trust_policy).await?;
            emit(&status)
        }
        Command::RoleArn { role_name } => {
            let arn = omics::get_role_arn(clients, role_name).await?;
            emit(&arn)
        }
        Command::RefStoreId => {
            let store_id = omics::get_ref_store_id(clients).await?;
            emit(&store_id)
        }
        Command::ReferenceArn { name, all_pages } => {
            let arn = if *all_pages {
                omics::find_reference_arn(clients, name).await?
            } else {
                omics::get_reference_arn(clients, name).await?
            };
            emit(&arn)
        }
        Command::ResourceLink {
            store_name,
            store_id,
            store_kind,
            store_type,
            database,
            all_pages,
        } => {
            let kind = StoreKind::from(*store_kind);
            let store = match store_id {
                Some(id) => Store::new(id, store_name, kind.label()),
                None => omics::get_analytics_store(clients, kind, store_name).await?,
            };
            let database = config.effective_database(database.as_deref());
            let store_type = store_type.as_deref().unwrap_or(kind.label());
            let pagination = if *all_pages {
                Pagination::AllPages
            } else {
                Pagination::FirstPage
            };

            let link = ResourceLinkRequest::new(&database, &store)
                .store_type(store_type)
                .pagination(pagination)
                .send(clients)
                .await?;
            emit(&link)
        }
        Command::Configure { .. } => Ok(()),
    }
}

fn emit<T: Serialize>(value: &T) -> Result<(), OmicsError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
