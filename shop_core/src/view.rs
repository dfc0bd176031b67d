//! Page models, one per route.
//!
//! They are plain serializable snapshots: a front-end renders them and never reaches back into
//! the catalog or the collections.

use rand::Rng;
use serde::Serialize;
use shop_common::{Category, Price, Product, ProductId};

use crate::collection::{Collection, CollectionName};
use crate::filter::{self, CategoryFilter, ALL};
use crate::nav::NavLink;
use crate::{featured, share, Catalog, Config};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub featured: Vec<Product>,
}

impl HomePage {
    pub fn new<R: Rng + ?Sized>(catalog: &Catalog, featured_count: usize, rng: &mut R) -> Self {
        let featured = featured::sample(catalog.products(), featured_count, rng);
        Self {
            featured: featured.into_iter().cloned().collect(),
        }
    }
}

/// An entry of the category dropdown of the shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub id: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// The "all" entry followed by every category, in declaration order
pub fn category_options(selected: CategoryFilter) -> Vec<CategoryOption> {
    let all = CategoryOption {
        id: ALL,
        label: "All categories",
        selected: selected == CategoryFilter::All,
    };
    std::iter::once(all)
        .chain(Category::ALL.iter().map(|c| CategoryOption {
            id: c.id(),
            label: c.label(),
            selected: selected == CategoryFilter::Only(*c),
        }))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopPage {
    pub category: CategoryFilter,
    pub search: String,
    pub categories: Vec<CategoryOption>,
    pub products: Vec<Product>,
}

impl ShopPage {
    pub fn new(catalog: &Catalog, category: CategoryFilter, search: &str) -> Self {
        let products = filter::filter(catalog.products(), category, search);
        Self {
            category,
            search: search.to_string(),
            categories: category_options(category),
            products: products.into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub category_label: Option<&'static str>,
    pub featured: bool,
    pub in_stock: bool,
    pub in_cart: bool,
    pub in_wishlist: bool,
    pub share_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ProductPage {
    Found(Box<ProductDetail>),
    NotFound { id: ProductId },
}

impl ProductPage {
    pub fn new(
        catalog: &Catalog,
        id: &ProductId,
        cart: &Collection,
        wishlist: &Collection,
        config: &Config,
    ) -> Self {
        match catalog.find_by_id(id) {
            Ok(product) => ProductPage::Found(Box::new(ProductDetail {
                product: product.clone(),
                category_label: product.category.map(|c| c.label()),
                featured: product.is_featured(),
                in_stock: product.is_in_stock(),
                in_cart: cart.contains(id),
                in_wishlist: wishlist.contains(id),
                share_url: share::share_url(config, id),
            })),
            Err(_) => ProductPage::NotFound { id: id.clone() },
        }
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            ProductPage::Found(detail) => Some(&detail.product),
            ProductPage::NotFound { .. } => None,
        }
    }
}

/// The cart or the wishlist page. Only the cart shows a price total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPage {
    pub name: CollectionName,
    pub items: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Price>,
    pub total_coins: u64,
}

impl CollectionPage {
    pub fn new(collection: &Collection) -> Self {
        let items = collection.load();
        let total = match collection.name() {
            CollectionName::Cart => Some(items.iter().map(|p| p.price).sum()),
            CollectionName::Wishlist => None,
        };
        let total_coins = items
            .iter()
            .filter_map(|p| p.coins)
            .fold(0u64, |acc, c| acc.saturating_add(c));
        Self {
            name: collection.name(),
            items,
            total,
            total_coins,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", content = "model", rename_all = "camelCase")]
pub enum Page {
    Home(HomePage),
    Shop(ShopPage),
    Product(ProductPage),
    Cart(CollectionPage),
    Wishlist(CollectionPage),
    NotFound { path: String },
}

/// A page together with the navigation bar shown above it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub nav: Vec<NavLink>,
    pub page: Page,
}
