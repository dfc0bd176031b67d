use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use shop_common::{Product, ProductId};

use crate::{consts, Error};

#[derive(Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The read-only set of products offered by the shop.
///
/// Built once at startup, never mutated afterwards. Products keep the order they are declared
/// in the source.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Create a catalog from the given products, erroring on duplicated ids
    pub fn new(products: Vec<Product>) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), i).is_some() {
                return Err(Error::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// The catalog bundled in the build
    pub fn bundled() -> Result<Self, Error> {
        Self::from_json(consts::BUNDLED_CATALOG)
    }

    /// Parse a catalog with shape `{ "products": [...] }`
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self::new(file.products)?;
        log::debug!("catalog loaded with {} products", catalog.len());
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get the product with the given id
    pub fn find_by_id(&self, id: &ProductId) -> Result<&Product, Error> {
        self.index
            .get(id)
            .map(|i| &self.products[*i])
            .ok_or_else(|| Error::ProductNotExist(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
