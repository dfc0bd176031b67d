//! Stores backing the collections in the browser.
//!
//! [`BrowserStore`] keeps each collection as a JSON string under its key in `window.localStorage`.
//! [`JsStoreLink`] adapts any JS object with `get`, `put` and `remove` methods, for example to
//! keep collections in `sessionStorage` or in memory during tests.

use shop_core::shop_common::Store;
use wasm_bindgen::prelude::*;

/// Error type of the browser stores
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Error from JavaScript
    #[error("{0}")]
    Js(String),

    #[error("localStorage is not available")]
    Unavailable,

    #[error("value of '{0}' is not valid UTF-8")]
    NotUtf8(String),
}

fn js_error(e: JsValue) -> StoreError {
    StoreError::Js(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

/// A [`Store`] over `window.localStorage`.
///
/// The storage handle is looked up on every call, so the struct holds no JS object.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(js_error)?
            .ok_or(StoreError::Unavailable)
    }
}

impl Store for BrowserStore {
    type Error = StoreError;

    fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<Vec<u8>>, Self::Error> {
        let key = String::from_utf8_lossy(key.as_ref());
        let value = Self::storage()?.get_item(&key).map_err(js_error)?;
        Ok(value.map(String::into_bytes))
    }

    fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&self, key: K, value: V) -> Result<(), Self::Error> {
        let key = String::from_utf8_lossy(key.as_ref());
        let value = std::str::from_utf8(value.as_ref())
            .map_err(|_| StoreError::NotUtf8(key.to_string()))?;
        // Throws a QuotaExceededError when the origin is out of space
        Self::storage()?.set_item(&key, value).map_err(js_error)
    }

    fn remove<K: AsRef<[u8]>>(&self, key: K) -> Result<(), Self::Error> {
        let key = String::from_utf8_lossy(key.as_ref());
        Self::storage()?.remove_item(&key).map_err(js_error)
    }
}

// Duck-typed JavaScript storage interface.
#[wasm_bindgen]
extern "C" {
    /// A duck-typed JavaScript storage object.
    ///
    /// Any JS object with `get(key) -> string|null`, `put(key, value)` and `remove(key)`
    /// methods can be used. Values are the JSON of the collection.
    ///
    /// ```js
    /// const storage = {
    ///     _data: new Map(),
    ///     get(key) { return this._data.get(key) ?? null; },
    ///     put(key, value) { this._data.set(key, value); },
    ///     remove(key) { this._data.delete(key); }
    /// };
    /// ```
    pub type JsStorage;

    #[wasm_bindgen(method, catch)]
    fn get(this: &JsStorage, key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn put(this: &JsStorage, key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn remove(this: &JsStorage, key: &str) -> Result<(), JsValue>;
}

/// A bridge that connects a [`JsStorage`] to [`Store`].
pub struct JsStoreLink {
    inner: JsStorage,
}

impl std::fmt::Debug for JsStoreLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JsStoreLink")
    }
}

impl JsStoreLink {
    pub fn new(storage: JsStorage) -> Self {
        Self { inner: storage }
    }
}

impl Store for JsStoreLink {
    type Error = StoreError;

    fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<Vec<u8>>, Self::Error> {
        let key = String::from_utf8_lossy(key.as_ref());
        let value = self.inner.get(&key).map_err(js_error)?;
        Ok(value.map(String::into_bytes))
    }

    fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&self, key: K, value: V) -> Result<(), Self::Error> {
        let key = String::from_utf8_lossy(key.as_ref());
        let value = std::str::from_utf8(value.as_ref())
            .map_err(|_| StoreError::NotUtf8(key.to_string()))?;
        self.inner.put(&key, value).map_err(js_error)
    }

    fn remove<K: AsRef<[u8]>>(&self, key: K) -> Result<(), Self::Error> {
        let key = String::from_utf8_lossy(key.as_ref());
        self.inner.remove(&key).map_err(js_error)
    }
}

// Send + Sync are required by Store
// Safety: WASM is single-threaded, so these are safe to implement
unsafe impl Send for JsStoreLink {}
unsafe impl Sync for JsStoreLink {}
