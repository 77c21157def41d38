mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Browse the shop catalog and manage your cart")]
struct Cli {
    /// Config file (default: <config dir>/storefront/config.json if present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the cart snapshot.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Read the catalog from a local JSON file instead of the network.
    #[arg(long, global = true, value_name = "FILE")]
    catalog_file: Option<PathBuf>,

    /// Catalog endpoint URL.
    #[arg(long, global = true, value_name = "URL")]
    catalog_url: Option<String>,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products, optionally filtered by a search query.
    #[command(alias = "shop")]
    Products {
        /// Case-insensitive match on title or description.
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Inspect or change the cart.
    #[command(subcommand)]
    Cart(CartCommand),

    /// Show the order summary. Payment is not supported.
    Checkout,
}

#[derive(Subcommand, Debug)]
enum CartCommand {
    /// Show cart lines and the total.
    #[command(alias = "ls")]
    Show,
    /// Add one unit of a catalog product.
    Add { id: u64 },
    /// Remove a product's line.
    #[command(alias = "rm")]
    Remove { id: u64 },
    /// Set a line's quantity; zero or less removes it.
    Set {
        id: u64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// One more unit of a line.
    Inc { id: u64 },
    /// One less unit of a line (never below 1).
    Dec { id: u64 },
    /// Remove every line.
    Clear,
}

/// Level used when `RUST_LOG` is unset: `-v` is debug, `-vv` is trace.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::Ctx::new(commands::Overrides {
        config: cli.config,
        data_dir: cli.data_dir,
        catalog_file: cli.catalog_file,
        catalog_url: cli.catalog_url,
    })?;

    match cli.command {
        Command::Products { search } => commands::products(&ctx, search.as_deref()).await,
        Command::Cart(cmd) => match cmd {
            CartCommand::Show => commands::cart_show(&ctx),
            CartCommand::Add { id } => commands::cart_add(&ctx, id).await,
            CartCommand::Remove { id } => commands::cart_remove(&ctx, id),
            CartCommand::Set { id, quantity } => commands::cart_set(&ctx, id, quantity),
            CartCommand::Inc { id } => commands::cart_step(&ctx, id, commands::Step::Up),
            CartCommand::Dec { id } => commands::cart_step(&ctx, id, commands::Step::Down),
            CartCommand::Clear => commands::cart_clear(&ctx),
        },
        Command::Checkout => commands::checkout(&ctx),
    }
}
