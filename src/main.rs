use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use unlockable_catalog::filter::{self, FilterCriteria, SortKey, UnlockableItem};
use unlockable_catalog::state::LoadStatus;
use unlockable_catalog::taxonomy;
use unlockable_catalog::{AssetResolver, Catalog, Config, Rarity, SqliteCatalog, UnlockableType};

#[derive(Parser)]
#[command(name = "unlockable-catalog")]
#[command(about = "Browse game unlockables and their icons", long_about = None)]
struct Cli {
    /// Settings file (defaults to the user's config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve icons and print the filtered catalog
    List {
        /// Folder to scan instead of the configured one
        #[arg(long)]
        folder: Option<PathBuf>,
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long = "rarity")]
        rarities: Vec<Rarity>,
        #[arg(long = "type")]
        types: Vec<UnlockableType>,
        /// default, name, character, rarity or type
        #[arg(long)]
        sort: Option<SortKey>,
        /// Also print the entries that were filtered out
        #[arg(long)]
        all: bool,
    },
    /// Print the available categories, types, rarities and sort options
    Taxonomy,
    /// Check and store display settings
    SetDisplay {
        width: String,
        height: String,
        ui_scale: String,
    },
    /// Check and store the unlockables folder
    SetFolder { folder: PathBuf },
}

fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_catalog(config: &Config) -> Result<Catalog> {
    let source = SqliteCatalog::new(config.bundled_assets().database());
    let catalog = Catalog::open(&source).context("catalog database is corrupt")?;

    if let LoadStatus::Unavailable { reason } = catalog.status() {
        eprintln!("Catalog unavailable, showing nothing: {}", reason);
    }
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("failed to read settings from {}", config_path.display()))?;

    match cli.command {
        Command::List {
            folder,
            name,
            categories,
            rarities,
            types,
            sort,
            all,
        } => {
            let catalog = open_catalog(&config)?;
            let root = folder.unwrap_or_else(|| config.scan_root());

            let resolver = AssetResolver::new(config.bundled_assets());
            let records = resolver
                .resolve_in_background(root, catalog.rows().to_vec())
                .await?;
            let items: Vec<UnlockableItem> = records.into_iter().map(UnlockableItem::new).collect();

            let criteria = FilterCriteria {
                name,
                categories: categories.into_iter().collect(),
                rarities: rarities.into_iter().collect(),
                types: types.into_iter().collect(),
                sort,
            };

            let mut shown = 0;
            for (item, included) in filter::apply(&items, &criteria) {
                if !included && !all {
                    continue;
                }
                shown += included as usize;
                let record = &item.record;
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    if included { "+" } else { "-" },
                    record.name,
                    record.category,
                    record.rarity,
                    record.kind,
                    record.image_path.display()
                );
            }
            println!("{} of {} unlockables shown", shown, items.len());
        }
        Command::Taxonomy => {
            let catalog = open_catalog(&config)?;
            println!("categories: {}", catalog.categories().join(", "));
            println!("characters: {}", catalog.characters().join(", "));
            println!("types: {}", taxonomy::type_labels().join(", "));
            println!("rarities: {}", taxonomy::rarity_labels().join(", "));
            println!("sorts: {}", taxonomy::sort_labels().join(", "));
        }
        Command::SetDisplay {
            width,
            height,
            ui_scale,
        } => {
            config.apply_display(&width, &height, &ui_scale)?;
            config.save(&config_path)?;
            println!("Display settings saved to {}", config_path.display());
        }
        Command::SetFolder { folder } => {
            config.set_unlockables_folder(folder)?;
            config.save(&config_path)?;
            println!("Unlockables folder saved to {}", config_path.display());
        }
    }

    Ok(())
}
