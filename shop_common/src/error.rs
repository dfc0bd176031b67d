#[allow(missing_docs)]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Price must be a finite non-negative number, given {0}")]
    PriceOutOfRange(f64),

    #[error("Price '{0}' is not a plain decimal number")]
    InvalidPrice(String),

    #[error("Price '{0}' has more than 2 decimal digits")]
    PriceTooPrecise(String),

    #[error("Price '{0}' is too large")]
    PriceOverflow(String),

    #[error("Product id cannot be empty")]
    EmptyProductId,
}
