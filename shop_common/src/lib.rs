#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! A crate containing common code used in multiple other crate in the workspace, such as:
//!
//!  * The [`Store`] trait: a key-value storage port that collections persist through, with an
//!    in-memory, a no-op and a file backed implementation.
//!  * The [`Product`] model as it appears in the bundled catalog and in stored snapshots, with
//!    its price normalized to [`Price`].
//!
//!  To avoid circular dependencies this crate must not depend on other crate of the workspace

mod error;
mod model;
mod store;

pub use crate::error::Error;
pub use crate::model::{Category, Price, Product, ProductId};
pub use crate::store::{BoxError, DynStore, FakeStore, FileStore, MemoryStore, Store};
