use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use shop_core::consts::{DEFAULT_BASE_PATH, DEFAULT_FEATURED_COUNT, DEFAULT_ORIGIN};
use shop_core::shop_common::ProductId;
use shop_core::CategoryFilter;

/// Browse the Summer of Making rewards shop, keep a cart and a wishlist on disk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory where the cart and the wishlist are stored, `~/.som-shop` if missing
    #[arg(long, env = "SHOP_DATADIR")]
    pub datadir: Option<PathBuf>,

    /// A catalog file with shape `{ "products": [...] }` to use instead of the bundled one
    #[arg(long, env = "SHOP_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Path the site is served under, used by routes and share links
    #[arg(long, env = "SHOP_BASE_PATH", default_value = DEFAULT_BASE_PATH)]
    pub base_path: String,

    /// Scheme and host of the site, used by share links
    #[arg(long, env = "SHOP_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Number of featured products on the home page
    #[arg(long, env = "SHOP_FEATURED", default_value_t = DEFAULT_FEATURED_COUNT)]
    pub featured: usize,

    /// The sub command
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List the catalog, optionally filtered by category and search term
    Products {
        /// `all` or a category id such as `electric`
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Case insensitive text to look for in name and description
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Details of a product, including whether it is in the cart or the wishlist
    Product { id: ProductId },

    /// Random pick of featured products
    Featured {
        /// How many, the configured home page count if missing
        #[arg(long)]
        count: Option<usize>,

        /// Seed of the random generator, for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Ids and labels of the categories
    Categories,

    /// Cart related commands (list, add, remove, clear, total)
    Cart(CollectionArgs),

    /// Wishlist related commands (list, add, remove, clear, total)
    Wishlist(CollectionArgs),

    /// Render the page at the given path with its navigation bar
    Open {
        path: String,

        /// Seed of the random generator used by the home page
        #[arg(long)]
        seed: Option<u64>,
    },

    /// The navigation bar as shown on the page at the given path
    Nav { path: String },

    /// The absolute link to a product page
    Share { id: ProductId },

    #[clap(hide = true)]
    GenerateCompletion { shell: Shell },
}

impl CliCommand {
    /// Commands reading or writing the collections in the datadir
    pub(crate) fn requires_store(&self) -> bool {
        matches!(
            self,
            CliCommand::Product { .. }
                | CliCommand::Cart(_)
                | CliCommand::Wishlist(_)
                | CliCommand::Open { .. }
        )
    }
}

#[derive(Debug, Args)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub command: CollectionCommand,
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// The products in the collection
    List,

    /// Add the catalog product with the given id, nothing happens if already present
    Add { id: ProductId },

    /// Remove the product with the given id, nothing happens if absent
    Remove { id: ProductId },

    /// Remove every product
    Clear,

    /// Sum of prices and coins of the products in the collection
    Total,
}
