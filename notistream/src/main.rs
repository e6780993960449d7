use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use cmd::{check, list, migrate, notification};
use logger::Logger;
use notistream_api::{entity::notifications::NotificationLevel, uuid::Uuid};
use tracing::error;

mod cmd;
mod db;
mod logger;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        default_value = "conf.yml"
    )]
    config: PathBuf,

    /// Show verbose/debug log
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not print any log
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use JSON to format log
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Check config file and configured implementations
    Check,
    /// Apply pending database migrations
    Migrate,
    /// List notifications as JSON lines
    List(ListArgs),
    /// Notification management
    Notification(NotificationCli),
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Clone)]
struct ListArgs {
    /// Only notifications of this recipient
    #[arg(short, long)]
    recipient: Option<Uuid>,

    /// Only unread notifications
    #[arg(long, conflicts_with = "read")]
    unread: bool,

    /// Only read notifications
    #[arg(long)]
    read: bool,

    /// Only deleted notifications, soft delete mode only
    #[arg(long, conflicts_with_all = ["read", "unread"])]
    deleted: bool,

    /// Only notifications of this level, name or number
    #[arg(short, long)]
    level: Option<NotificationLevel>,

    /// Page number, starting from 1
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Page size
    #[arg(long, default_value_t = 10)]
    size: u64,
}

#[derive(Args, Clone)]
struct NotificationCli {
    #[command(subcommand)]
    command: NotificationCommands,
}

#[derive(Subcommand, Clone)]
enum NotificationCommands {
    /// Mark all unread notifications as read
    Read {
        /// Only notifications of this recipient
        #[arg(short, long)]
        recipient: Option<Uuid>,
    },
    /// Mark all read notifications as unread
    Unread {
        /// Only notifications of this recipient
        #[arg(short, long)]
        recipient: Option<Uuid>,
    },
    /// Mark all active notifications as deleted, soft delete mode only
    Trash {
        /// Only notifications of this recipient
        #[arg(short, long)]
        recipient: Option<Uuid>,
    },
    /// Mark all deleted notifications as active, soft delete mode only
    Restore {
        /// Only notifications of this recipient
        #[arg(short, long)]
        recipient: Option<Uuid>,
    },
    /// Delete one notification according to the delete mode
    Delete {
        /// Notification id
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut logger = Logger::new();
    logger.verbose = cli.verbose;
    logger.json = cli.log_json;
    logger.enable = !cli.quiet;
    // init logger first
    if let Err(e) = logger.init() {
        eprintln!("Logger init failed: {e}");
        return ExitCode::FAILURE;
    }

    let ret = match &cli.command {
        Commands::Check => check::command(&cli),
        Commands::Migrate => migrate::command(&cli).await,
        Commands::List(args) => list::command(&cli, args).await,
        Commands::Notification(x) => notification::command(&cli, x).await,
    };
    match ret {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
