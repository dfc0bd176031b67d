//! WASM bindings of the shop: the storefront with cart and wishlist persisted in the browser.

mod error;
mod logger;
mod store;
mod storefront;

pub(crate) use error::Error;
pub use logger::set_log_level;
pub use store::{BrowserStore, JsStorage, JsStoreLink, StoreError};
pub use storefront::Storefront;

use wasm_bindgen::prelude::*;

/// Called when the module is instantiated
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logger::init(log::LevelFilter::Warn);
}
