use std::sync::Arc;

use rand::Rng;
use shop_common::{DynStore, FakeStore, Price, Product, ProductId};

use crate::collection::{Collection, CollectionName};
use crate::filter::{self, CategoryFilter};
use crate::nav::{self, NavLink, Route};
use crate::notice::Notice;
use crate::view::{CollectionPage, HomePage, Page, ProductPage, Screen, ShopPage};
use crate::{featured, share, Catalog, Config, Error};

/// A builder for the [`Storefront`] struct
pub struct StorefrontBuilder {
    catalog: Catalog,
    store: Arc<dyn DynStore>,
    config: Config,
}

impl StorefrontBuilder {
    /// Create a `Storefront` builder over the given catalog
    ///
    /// Without a store the collections live in memory only.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            store: Arc::new(FakeStore::new()),
            config: Config::default(),
        }
    }

    /// Specify the store the cart and the wishlist persist to
    pub fn with_store(mut self, store: Arc<dyn DynStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Storefront {
        Storefront {
            catalog: self.catalog,
            cart: Collection::new(CollectionName::Cart, self.store.clone()),
            wishlist: Collection::new(CollectionName::Wishlist, self.store),
            config: self.config,
        }
    }
}

/// The catalog together with the visitor's cart and wishlist.
///
/// Entry point of the front-ends: core operations plus one page model per route.
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    cart: Collection,
    wishlist: Collection,
    config: Config,
}

impl Storefront {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn collection(&self, name: CollectionName) -> &Collection {
        match name {
            CollectionName::Cart => &self.cart,
            CollectionName::Wishlist => &self.wishlist,
        }
    }

    pub fn find_by_id(&self, id: &ProductId) -> Result<&Product, Error> {
        self.catalog.find_by_id(id)
    }

    pub fn load(&self, name: CollectionName) -> Vec<Product> {
        self.collection(name).load()
    }

    pub fn contains(&self, name: CollectionName, id: &ProductId) -> bool {
        self.collection(name).contains(id)
    }

    pub fn add(&self, name: CollectionName, product: &Product) -> Result<Vec<Product>, Error> {
        self.collection(name).add(product)
    }

    /// Add a snapshot of the catalog product with the given id
    pub fn add_by_id(&self, name: CollectionName, id: &ProductId) -> Result<Vec<Product>, Error> {
        let product = self.catalog.find_by_id(id)?;
        self.collection(name).add(product)
    }

    pub fn remove(&self, name: CollectionName, id: &ProductId) -> Result<Vec<Product>, Error> {
        self.collection(name).remove(id)
    }

    pub fn clear(&self, name: CollectionName) -> Result<(), Error> {
        self.collection(name).clear()
    }

    pub fn total(&self, name: CollectionName) -> Price {
        self.collection(name).total()
    }

    pub fn filter(&self, category: CategoryFilter, search_term: &str) -> Vec<&Product> {
        filter::filter(self.catalog.products(), category, search_term)
    }

    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<&Product> {
        featured::sample(self.catalog.products(), n, rng)
    }

    pub fn share_url(&self, id: &ProductId) -> String {
        share::share_url(&self.config, id)
    }

    pub fn nav_links(&self, route: &Route) -> Vec<NavLink> {
        nav::nav_links(route, &self.config.base_path)
    }

    pub fn home_page<R: Rng + ?Sized>(&self, rng: &mut R) -> HomePage {
        HomePage::new(&self.catalog, self.config.featured_count, rng)
    }

    pub fn shop_page(&self, category: CategoryFilter, search_term: &str) -> ShopPage {
        ShopPage::new(&self.catalog, category, search_term)
    }

    pub fn product_page(&self, id: &ProductId) -> ProductPage {
        ProductPage::new(&self.catalog, id, &self.cart, &self.wishlist, &self.config)
    }

    pub fn collection_page(&self, name: CollectionName) -> CollectionPage {
        CollectionPage::new(self.collection(name))
    }

    /// The page of `route` with the navigation bar. The shop starts unfiltered.
    pub fn render<R: Rng + ?Sized>(&self, route: &Route, rng: &mut R) -> Screen {
        let page = match route {
            Route::Home => Page::Home(self.home_page(rng)),
            Route::Shop => Page::Shop(self.shop_page(CategoryFilter::All, "")),
            Route::Product(id) => Page::Product(self.product_page(id)),
            Route::Cart => Page::Cart(self.collection_page(CollectionName::Cart)),
            Route::Wishlist => Page::Wishlist(self.collection_page(CollectionName::Wishlist)),
            Route::NotFound(path) => Page::NotFound { path: path.clone() },
        };
        Screen {
            nav: self.nav_links(route),
            page,
        }
    }

    /// Render the page at `path`, with or without the base path prefix
    pub fn open<R: Rng + ?Sized>(&self, path: &str, rng: &mut R) -> Screen {
        let route = Route::parse(path, &self.config.base_path);
        log::debug!("opening {path} as {route:?}");
        self.render(&route, rng)
    }

    /// Handle the "add to cart/wishlist" action of a page
    pub fn add_to(&self, name: CollectionName, id: &ProductId) -> Notice {
        let product = match self.catalog.find_by_id(id) {
            Ok(product) => product,
            Err(e) => return Notice::error(e.to_string()),
        };
        if self.contains(name, id) {
            return Notice::info(format!("{} is already in your {name}", product.name));
        }
        match self.add(name, product) {
            Ok(_) => Notice::success(format!("{} added to your {name}", product.name)),
            Err(e) => Notice::error(e.to_string()),
        }
    }

    /// Handle the "remove" action of the cart and wishlist pages
    pub fn remove_from(&self, name: CollectionName, id: &ProductId) -> Notice {
        let Some(product) = self.load(name).into_iter().find(|p| &p.id == id) else {
            return Notice::info(format!("Product '{id}' is not in your {name}"));
        };
        match self.remove(name, id) {
            Ok(_) => Notice::success(format!("{} removed from your {name}", product.name)),
            Err(e) => Notice::error(e.to_string()),
        }
    }
}
