use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use shop_common::{DynStore, Price, Product, ProductId};

use crate::Error;

/// The named lists a visitor keeps in durable storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    Cart,
    Wishlist,
}

impl CollectionName {
    /// The key the collection is stored under
    pub fn key(&self) -> &'static str {
        match self {
            CollectionName::Cart => "cart",
            CollectionName::Wishlist => "wishlist",
        }
    }
}

impl Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CollectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(CollectionName::Cart),
            "wishlist" => Ok(CollectionName::Wishlist),
            _ => Err(Error::UnknownCollection(s.to_string())),
        }
    }
}

/// A named, durably persisted list of product snapshots.
///
/// Snapshots are full copies of the product taken when it is added, later catalog changes do
/// not affect them. Ids are unique within a collection.
///
/// The in-memory copy is hydrated from the store on first access. Every mutation rewrites the
/// whole list under [`CollectionName::key`] while holding the collection lock, so the
/// containment check of [`Collection::add`] always sees the latest state. If the write fails
/// the in-memory copy keeps its previous value.
#[derive(Debug)]
pub struct Collection {
    name: CollectionName,
    store: Arc<dyn DynStore>,
    /// `None` until hydrated
    items: Mutex<Option<Vec<Product>>>,
}

impl Collection {
    pub fn new(name: CollectionName, store: Arc<dyn DynStore>) -> Self {
        Self {
            name,
            store,
            items: Mutex::new(None),
        }
    }

    pub fn name(&self) -> CollectionName {
        self.name
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<Product>>> {
        // The guarded value is replaced only after a successful write, a panic cannot leave it
        // half updated
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the stored list, an absent or undecodable entry is an empty list.
    ///
    /// Only a failing store is an error.
    fn read_stored(&self) -> Result<Vec<Product>, Error> {
        let key = self.name.key();
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(vec![]),
            Err(e) => {
                return Err(Error::Read {
                    name: self.name,
                    message: e.to_string(),
                })
            }
        };
        match serde_json::from_slice::<Vec<Product>>(&bytes) {
            Ok(products) => {
                let mut unique: Vec<Product> = Vec::with_capacity(products.len());
                for product in products {
                    if !unique.iter().any(|p| p.id == product.id) {
                        unique.push(product);
                    }
                }
                log::debug!("hydrated {key} with {} products", unique.len());
                Ok(unique)
            }
            Err(e) => {
                log::warn!("stored {key} cannot be decoded, starting empty: {e}");
                Ok(vec![])
            }
        }
    }

    /// The in-memory list, read from the store if not hydrated yet.
    ///
    /// A failed read leaves the collection unhydrated, so a later access retries and no write
    /// replaces an entry that could not be read.
    fn hydrated<'a>(
        &self,
        guard: &'a mut MutexGuard<'_, Option<Vec<Product>>>,
    ) -> Result<&'a mut Vec<Product>, Error> {
        let items = match guard.take() {
            Some(items) => items,
            None => self.read_stored()?,
        };
        Ok(guard.insert(items))
    }

    /// Apply `f` to the current list, an unreadable store shows as empty
    fn with_items<T>(&self, f: impl FnOnce(&[Product]) -> T) -> T {
        let mut guard = self.lock();
        match self.hydrated(&mut guard) {
            Ok(items) => f(items),
            Err(e) => {
                log::warn!("{e}, showing it empty");
                f(&[])
            }
        }
    }

    fn write(&self, products: &[Product]) -> Result<(), Error> {
        let bytes = serde_json::to_vec(products)?;
        self.store.put(self.name.key(), &bytes).map_err(|e| {
            log::warn!("cannot persist {}: {e}", self.name);
            Error::Persist {
                name: self.name,
                message: e.to_string(),
            }
        })
    }

    /// The current list. Never fails: storage problems result in an empty list.
    pub fn load(&self) -> Vec<Product> {
        self.with_items(<[Product]>::to_vec)
    }

    /// Drop the in-memory copy, the next access reads the store again
    pub fn reload(&self) -> Vec<Product> {
        *self.lock() = None;
        self.load()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.with_items(|items| items.iter().any(|p| &p.id == id))
    }

    /// Append a snapshot of `product` unless a product with the same id is already present.
    ///
    /// Returns the resulting list. Fails without writing if the stored list cannot be read.
    pub fn add(&self, product: &Product) -> Result<Vec<Product>, Error> {
        let mut guard = self.lock();
        let items = self.hydrated(&mut guard)?;
        if items.iter().any(|p| p.id == product.id) {
            return Ok(items.clone());
        }

        let mut updated = items.clone();
        updated.push(product.clone());
        self.write(&updated)?;
        *items = updated;
        Ok(items.clone())
    }

    /// Remove the product with the given id, if present.
    ///
    /// Returns the resulting list.
    pub fn remove(&self, id: &ProductId) -> Result<Vec<Product>, Error> {
        let mut guard = self.lock();
        let items = self.hydrated(&mut guard)?;
        if !items.iter().any(|p| &p.id == id) {
            return Ok(items.clone());
        }

        let updated: Vec<Product> = items.iter().filter(|p| &p.id != id).cloned().collect();
        self.write(&updated)?;
        *items = updated;
        Ok(items.clone())
    }

    /// Empty the collection and delete its stored entry
    pub fn clear(&self) -> Result<(), Error> {
        let mut guard = self.lock();
        self.store
            .remove(self.name.key())
            .map_err(|e| Error::Clear {
                name: self.name,
                message: e.to_string(),
            })?;
        *guard = Some(vec![]);
        Ok(())
    }

    /// Sum of the prices of the products in the collection
    pub fn total(&self) -> Price {
        self.with_items(|items| items.iter().map(|p| p.price).sum())
    }

    /// Sum of the coin costs, products without one count zero
    pub fn total_coins(&self) -> u64 {
        self.with_items(|items| {
            items
                .iter()
                .filter_map(|p| p.coins)
                .fold(0u64, |acc, c| acc.saturating_add(c))
        })
    }

    pub fn len(&self) -> usize {
        self.with_items(<[Product]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
