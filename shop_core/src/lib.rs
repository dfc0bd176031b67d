#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! A library for a client side rewards shop: a static catalog, a cart and a wishlist persisted
//! in local storage.
//!
//! The [`Catalog`] is loaded once from the bundled `products.json`. The cart and the wishlist
//! are [`Collection`]s of product snapshots written through a [`shop_common::DynStore`] after
//! every change. [`filter()`] and [`sample`] are pure functions over the catalog.
//!
//! Front-ends usually go through the [`Storefront`], which also produces the page model of
//! every [`Route`].
//!
//! ## Examples
//!
//! ```rust
//! # use std::sync::Arc;
//! # use shop_core::{Catalog, CategoryFilter, CollectionName, StorefrontBuilder};
//! # use shop_core::shop_common::MemoryStore;
//! let catalog = Catalog::bundled()?;
//! let shop = StorefrontBuilder::new(catalog)
//!     .with_store(Arc::new(MemoryStore::new()))
//!     .build();
//!
//! let watches = shop.filter(CategoryFilter::All, "watch");
//! let cart = shop.add(CollectionName::Cart, watches[0])?;
//! assert_eq!(cart.len(), 1);
//! # Ok::<(), shop_core::Error>(())
//! ```

mod catalog;
mod collection;
mod config;
pub mod consts;
mod error;
mod featured;
mod filter;
mod nav;
mod notice;
mod share;
mod storefront;
pub mod view;

pub use crate::catalog::Catalog;
pub use crate::collection::{Collection, CollectionName};
pub use crate::config::{normalize_base_path, Config};
pub use crate::error::Error;
pub use crate::featured::{sample, sample_random};
pub use crate::filter::{filter, CategoryFilter};
pub use crate::nav::{nav_links, NavLink, Route};
pub use crate::notice::{Notice, NoticeLevel};
pub use crate::share::share_url;
pub use crate::storefront::{Storefront, StorefrontBuilder};

pub use shop_common;
