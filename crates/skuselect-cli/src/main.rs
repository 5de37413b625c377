mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "skuselect")]
#[command(about = "Inspect and exercise storefront variant resolution")]
struct Cli {
    /// Catalog file to read (overrides SKUSELECT_CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List product families in the catalog
    Products,
    /// Print the selectable groups of a product family as JSON
    Groups {
        /// Product family id
        #[arg(long)]
        product: String,
    },
    /// Resolve a variant from a query string and a sequence of selections
    Resolve {
        /// Product family id
        #[arg(long)]
        product: String,
        /// Page query string used as deep-link hints (e.g. "size=M&color=Black")
        #[arg(long, default_value = "")]
        query: String,
        /// Selection to apply, as GROUP=OPTION_ID; may be repeated
        #[arg(long = "select", value_parser = resolve::parse_selection)]
        selections: Vec<resolve::Selection>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = skuselect_core::load_engine_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli.catalog.unwrap_or(config.catalog_path);
    tracing::debug!(env = %config.env, catalog = %catalog_path.display(), "starting");

    match cli.command {
        Some(Commands::Products) => resolve::run_products(&catalog_path)?,
        Some(Commands::Groups { product }) => resolve::run_groups(&catalog_path, &product)?,
        Some(Commands::Resolve {
            product,
            query,
            selections,
        }) => resolve::run_resolve(&catalog_path, &product, &query, &selections)?,
        None => println!("skuselect: use --help to list commands"),
    }

    Ok(())
}
