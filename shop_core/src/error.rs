use shop_common::ProductId;

use crate::collection::CollectionName;

/// Error type for the shop
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Common(#[from] shop_common::Error),

    #[error("Serde JSON Error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Product '{0}' does not exist")]
    ProductNotExist(ProductId),

    #[error("Product '{0}' appears more than once in the catalog")]
    DuplicateProduct(ProductId),

    #[error("Cannot read the {name}: {message}")]
    Read {
        name: CollectionName,
        message: String,
    },

    #[error("Cannot persist the {name}: {message}")]
    Persist {
        name: CollectionName,
        message: String,
    },

    #[error("Cannot clear the {name}: {message}")]
    Clear {
        name: CollectionName,
        message: String,
    },

    #[error("Unknown collection '{0}', expected 'cart' or 'wishlist'")]
    UnknownCollection(String),

    #[error("Cannot get home dir")]
    HomeDir,
}
