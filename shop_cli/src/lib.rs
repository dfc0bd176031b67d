#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use std::sync::Arc;

use anyhow::Context;
use clap::CommandFactory;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use shop_core::shop_common::{DynStore, FakeStore};
use shop_core::view::category_options;
use shop_core::{
    Catalog, CategoryFilter, CollectionName, Config, Route, Storefront, StorefrontBuilder,
};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use crate::args::{CliCommand, CollectionCommand};
pub use args::Cli;

mod args;

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn inner_main(args: args::Cli) -> anyhow::Result<Value> {
    let (appender, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(appender)
        .finish();
    // also forwards the `log` records of the library crates
    match subscriber.try_init() {
        Ok(_) => tracing::info!("logging initialized"),
        Err(_) => tracing::debug!("logging already initialized"),
    }

    tracing::info!("CLI initialized with args: {:?}", args);

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Cannot load the catalog at \"{}\"", path.display()))?,
        None => Catalog::bundled()?,
    };

    let mut config = Config::default()
        .with_base_path(&args.base_path)
        .with_origin(&args.origin)
        .with_featured_count(args.featured);
    if let Some(datadir) = args.datadir {
        config = config.with_datadir(datadir);
    }

    // Commands not touching the collections do not create the datadir
    let store: Arc<dyn DynStore> = if args.command.requires_store() {
        let store = config
            .file_store()
            .context("Cannot open the data directory")?;
        Arc::new(store)
    } else {
        Arc::new(FakeStore::new())
    };

    let shop = StorefrontBuilder::new(catalog)
        .with_store(store)
        .with_config(config)
        .build();

    Ok(match args.command {
        CliCommand::Products { category, search } => {
            serde_json::to_value(shop.shop_page(category, &search))?
        }
        CliCommand::Product { id } => serde_json::to_value(shop.product_page(&id))?,
        CliCommand::Featured { count, seed } => {
            let count = count.unwrap_or(shop.config().featured_count);
            let featured = shop.sample(count, &mut rng(seed));
            json!({ "featured": featured })
        }
        CliCommand::Categories => {
            json!({ "categories": category_options(CategoryFilter::All) })
        }
        CliCommand::Cart(a) => collection(&shop, CollectionName::Cart, a.command)?,
        CliCommand::Wishlist(a) => collection(&shop, CollectionName::Wishlist, a.command)?,
        CliCommand::Open { path, seed } => serde_json::to_value(shop.open(&path, &mut rng(seed)))?,
        CliCommand::Nav { path } => {
            let route = Route::parse(&path, &shop.config().base_path);
            json!({ "route": route, "nav": shop.nav_links(&route) })
        }
        CliCommand::Share { id } => {
            let product = shop.find_by_id(&id)?;
            json!({ "name": product.name, "url": shop.share_url(&id) })
        }
        CliCommand::GenerateCompletion { shell } => {
            let mut result = vec![];
            clap_complete::generate(shell, &mut Cli::command(), "shop", &mut result);
            let s = String::from_utf8(result)?;
            Value::String(s)
        }
    })
}

fn collection(
    shop: &Storefront,
    name: CollectionName,
    command: CollectionCommand,
) -> anyhow::Result<Value> {
    match command {
        CollectionCommand::List => {}
        CollectionCommand::Add { id } => {
            shop.add_by_id(name, &id)?;
        }
        CollectionCommand::Remove { id } => {
            shop.remove(name, &id)?;
        }
        CollectionCommand::Clear => shop.clear(name)?,
        CollectionCommand::Total => {
            let collection = shop.collection(name);
            return Ok(json!({
                "count": collection.len(),
                "total": collection.total(),
                "totalCoins": collection.total_coins(),
            }));
        }
    }
    Ok(serde_json::to_value(shop.collection_page(name))?)
}
