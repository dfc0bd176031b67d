use std::sync::Arc;

use shop_core::shop_common::{DynStore, ProductId};
use shop_core::{Catalog, CategoryFilter, CollectionName, Config, Notice, StorefrontBuilder};
use wasm_bindgen::prelude::*;

use crate::store::{BrowserStore, JsStorage, JsStoreLink};
use crate::Error;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

/// The shop catalog with the visitor's cart and wishlist.
///
/// Page models are returned as plain JS objects.
#[wasm_bindgen]
pub struct Storefront {
    inner: shop_core::Storefront,
}

impl AsRef<shop_core::Storefront> for Storefront {
    fn as_ref(&self) -> &shop_core::Storefront {
        &self.inner
    }
}

fn config(base_path: Option<String>, origin: Option<String>) -> Config {
    let mut config = Config::default();
    if let Some(base_path) = base_path {
        config = config.with_base_path(&base_path);
    }
    if let Some(origin) = origin {
        config = config.with_origin(&origin);
    }
    config
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, Error> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

#[wasm_bindgen]
impl Storefront {
    /// Create the storefront over the bundled catalog, with cart and wishlist in `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new(base_path: Option<String>, origin: Option<String>) -> Result<Storefront, Error> {
        Self::build(
            Catalog::bundled()?,
            Arc::new(BrowserStore::new()),
            config(base_path, origin),
        )
    }

    /// Create the storefront over the given catalog JSON, with collections kept in `storage`
    #[wasm_bindgen(js_name = withStorage)]
    pub fn with_storage(
        catalog: &str,
        storage: JsStorage,
        base_path: Option<String>,
    ) -> Result<Storefront, Error> {
        Self::build(
            Catalog::from_json(catalog)?,
            Arc::new(JsStoreLink::new(storage)),
            config(base_path, None),
        )
    }

    fn build(catalog: Catalog, store: Arc<dyn DynStore>, config: Config) -> Result<Self, Error> {
        let inner = StorefrontBuilder::new(catalog)
            .with_store(store)
            .with_config(config)
            .build();
        Ok(Self { inner })
    }

    /// The shop page: products passing the category filter and the search term
    pub fn products(&self, category: &str, search: &str) -> Result<JsValue, Error> {
        let category: CategoryFilter = category.parse()?;
        to_js(&self.inner.shop_page(category, search))
    }

    /// The product detail page, `{ status: "notFound" }` for an unknown id
    pub fn product(&self, id: &str) -> Result<JsValue, Error> {
        let id: ProductId = id.parse()?;
        to_js(&self.inner.product_page(&id))
    }

    /// A random pick of featured products, the configured count if missing
    pub fn featured(&self, count: Option<usize>) -> Result<JsValue, Error> {
        let count = count.unwrap_or(self.inner.config().featured_count);
        to_js(&self.inner.sample(count, &mut rand::thread_rng()))
    }

    /// The cart or wishlist page
    pub fn collection(&self, name: &str) -> Result<JsValue, Error> {
        let name: CollectionName = name.parse()?;
        to_js(&self.inner.collection_page(name))
    }

    pub fn contains(&self, name: &str, id: &str) -> Result<bool, Error> {
        let name: CollectionName = name.parse()?;
        let id: ProductId = id.parse()?;
        Ok(self.inner.contains(name, &id))
    }

    /// Sum of the prices in the collection
    pub fn total(&self, name: &str) -> Result<f64, Error> {
        let name: CollectionName = name.parse()?;
        Ok(self.inner.total(name).as_f64())
    }

    /// Add a catalog product to the collection, returns the notice to show
    pub fn add(&self, name: &str, id: &str) -> Result<JsValue, Error> {
        let name: CollectionName = name.parse()?;
        let id: ProductId = id.parse()?;
        to_js(&self.inner.add_to(name, &id))
    }

    /// Remove a product from the collection, returns the notice to show
    pub fn remove(&self, name: &str, id: &str) -> Result<JsValue, Error> {
        let name: CollectionName = name.parse()?;
        let id: ProductId = id.parse()?;
        to_js(&self.inner.remove_from(name, &id))
    }

    /// Render the page at `path` with its navigation bar
    pub fn open(&self, path: &str) -> Result<JsValue, Error> {
        to_js(&self.inner.open(path, &mut rand::thread_rng()))
    }

    #[wasm_bindgen(js_name = shareUrl)]
    pub fn share_url(&self, id: &str) -> Result<String, Error> {
        let id: ProductId = id.parse()?;
        Ok(self.inner.share_url(&id))
    }

    /// Copy the link of the product to the clipboard, returns the notice to show
    pub async fn share(&self, id: &str) -> Result<JsValue, Error> {
        let id: ProductId = id.parse()?;
        let notice = match self.inner.find_by_id(&id) {
            Ok(_) => copy_to_clipboard(&self.inner.share_url(&id)).await,
            Err(e) => Notice::error(e.to_string()),
        };
        to_js(&notice)
    }
}

async fn copy_to_clipboard(url: &str) -> Notice {
    clipboard_notice(write_text(url), url).await
}

/// The notice for a clipboard write, `write` is the outcome of calling `writeText`
async fn clipboard_notice(write: Result<js_sys::Promise, JsValue>, url: &str) -> Notice {
    let promise = match write {
        Ok(promise) => promise,
        Err(e) => {
            log::warn!("clipboard not available: {e:?}");
            return share_manually(url);
        }
    };
    match wasm_bindgen_futures::JsFuture::from(promise).await {
        Ok(_) => Notice::success("Link copied to the clipboard"),
        Err(e) => {
            log::warn!("clipboard write rejected: {e:?}");
            share_manually(url)
        }
    }
}

fn share_manually(url: &str) -> Notice {
    Notice::error(format!("Cannot copy the link, share it manually: {url}"))
}
