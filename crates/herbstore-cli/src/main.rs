mod browse;
mod order;
mod shop;

use clap::{Parser, Subcommand};
use herbstore_core::{builtin_catalog, load_catalog, AppConfig, Catalog, CategoryFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "herbstore", version)]
#[command(about = "Herbal storefront: catalog, cart and simulated checkout")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse, fill a cart and check out interactively (the default)
    Shop,
    /// List catalog products
    Catalog {
        /// Category to show: All, Tea, Oil, Salve or Supplement
        #[arg(long, default_value = "All")]
        category: CategoryFilter,

        /// Print products as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one product's full details
    Show {
        /// Product id, e.g. p1
        id: String,

        /// Print the product as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a WhatsApp order link for a list of items
    OrderLink {
        /// Item as `<id>` or `<id>=<quantity>`; repeat for more items
        #[arg(long = "item", value_parser = order::parse_item, required = true)]
        items: Vec<(String, u32)>,
    },
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout belongs to the storefront screens.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_store_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Ok(load_catalog(path)?),
        None => Ok(builtin_catalog()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = herbstore_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(?config, "configuration loaded");

    let catalog = load_store_catalog(&config)?;

    match cli.command {
        Some(Commands::Catalog { category, json }) => {
            browse::run_catalog(&catalog, category, json, &config.currency_symbol)?;
        }
        Some(Commands::Show { id, json }) => {
            browse::run_show(&catalog, &id, json, &config.currency_symbol)?;
        }
        Some(Commands::OrderLink { items }) => {
            order::run_order_link(catalog, &items, &config)?;
        }
        Some(Commands::Shop) | None => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut session = shop::Session::new(catalog, &config, input, std::io::stdout());
            session.run().await?;
        }
    }

    Ok(())
}
