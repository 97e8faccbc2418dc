use std::sync::Arc;

use anyhow::Context;
use atelier_cli::feed::HttpStatusFeed;
use atelier_cli::{commands, CliRole};
use atelier_core::cart::{CartCandidate, CartItemMetadata};
use atelier_core::status::StatusObservation;
use atelier_persistence::FileKeyValueStore;
use atelier_session::SessionEngine;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, global = true, help = "Directory holding the persisted session entries")]
    data_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the signed-in identity
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Inspect and mutate the active identity's cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Browse and manage notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Feed order status observations into the notification engine
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    #[command(name = "sign-in")]
    SignIn {
        #[arg(long, help = "User ID to sign in as")]
        id: String,
        #[arg(long, value_enum, default_value_t = CliRole::Customer)]
        role: CliRole,
    },
    #[command(name = "sign-out")]
    SignOut,
    Whoami,
}

#[derive(Subcommand)]
enum CartCommands {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, help = "Catalog item ID (omit for a custom design)")]
        id: Option<String>,
        #[arg(long)]
        qty: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        fabric: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long, help = "Estimated stitching days")]
        days: Option<u32>,
    },
    List,
    Remove {
        item_id: String,
    },
    Qty {
        item_id: String,
        #[arg(allow_negative_numbers = true, help = "New quantity; 0 or less removes the line")]
        qty: i64,
    },
    Clear,
}

#[derive(Subcommand)]
enum NotificationCommands {
    List {
        #[arg(long, help = "Only show unread notifications")]
        unread: bool,
    },
    Read {
        id: String,
    },
    #[command(name = "read-all")]
    ReadAll,
    Remove {
        id: String,
    },
    Clear,
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Record a status observation directly, without calling a feed
    Observe {
        order_id: String,
        status: String,
        #[arg(long)]
        tailor: Option<String>,
        #[arg(long)]
        tracking: Option<String>,
        #[arg(long)]
        eta: Option<String>,
    },
    /// Fetch the order's status once and run it through the watcher
    Poll {
        order_id: String,
        #[arg(long, help = "Base URL of the status feed")]
        feed: String,
    },
    /// Poll the feed repeatedly until the order is delivered
    Watch {
        order_id: String,
        #[arg(long, help = "Base URL of the status feed")]
        feed: String,
        #[arg(long, default_value_t = atelier_config::DEFAULT_POLL_INTERVAL_SECS)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    let root = match cli.data_dir {
        Some(dir) => dir,
        None => FileKeyValueStore::default_root().context("Failed to resolve a data directory")?,
    };
    let engine = SessionEngine::new(Arc::new(FileKeyValueStore::new(root)));

    match cli.command {
        Commands::Session { command } => match command {
            SessionCommands::SignIn { id, role } => {
                commands::cmd_sign_in(&engine, id, role.into())?
            }
            SessionCommands::SignOut => commands::cmd_sign_out(&engine)?,
            SessionCommands::Whoami => commands::cmd_whoami(&engine)?,
        },
        Commands::Cart { command } => match command {
            CartCommands::Add {
                name,
                price,
                id,
                qty,
                category,
                image,
                fabric,
                color,
                size,
                difficulty,
                days,
            } => {
                let candidate = CartCandidate {
                    id,
                    name,
                    price: Some(price),
                    quantity: qty,
                    category: category.unwrap_or_default(),
                    image: image.unwrap_or_default(),
                    metadata: CartItemMetadata {
                        fabric,
                        color,
                        size,
                        difficulty,
                        estimated_days: days,
                    },
                };
                commands::cmd_cart_add(&engine, candidate)?;
            }
            CartCommands::List => commands::cmd_cart_list(&engine)?,
            CartCommands::Remove { item_id } => commands::cmd_cart_remove(&engine, &item_id)?,
            CartCommands::Qty { item_id, qty } => commands::cmd_cart_qty(&engine, &item_id, qty)?,
            CartCommands::Clear => commands::cmd_cart_clear(&engine)?,
        },
        Commands::Notifications { command } => match command {
            NotificationCommands::List { unread } => {
                commands::cmd_notifications_list(&engine, unread)?
            }
            NotificationCommands::Read { id } => commands::cmd_notifications_read(&engine, &id)?,
            NotificationCommands::ReadAll => commands::cmd_notifications_read_all(&engine)?,
            NotificationCommands::Remove { id } => {
                commands::cmd_notifications_remove(&engine, &id)?
            }
            NotificationCommands::Clear => commands::cmd_notifications_clear(&engine)?,
        },
        Commands::Order { command } => match command {
            OrderCommands::Observe {
                order_id,
                status,
                tailor,
                tracking,
                eta,
            } => {
                let mut observation = StatusObservation::new(order_id, status);
                observation.assigned_tailor = tailor;
                observation.tracking_number = tracking;
                observation.estimated_delivery = eta;
                commands::cmd_order_observe(&engine, &observation)?;
            }
            OrderCommands::Poll { order_id, feed } => {
                let feed = HttpStatusFeed::new(feed)?;
                commands::cmd_order_poll(&engine, &feed, &order_id).await?;
            }
            OrderCommands::Watch {
                order_id,
                feed,
                interval,
            } => {
                let feed = HttpStatusFeed::new(feed)?;
                commands::cmd_order_watch(&engine, &feed, &order_id, interval).await?;
            }
        },
    }

    Ok(())
}
