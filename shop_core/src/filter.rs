use std::fmt::Display;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use shop_common::{Category, Product};

use crate::Error;

/// Id of the sentinel filter that accepts every category
pub const ALL: &str = "all";

/// Category predicate of the shop filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category.as_ref() == Some(category),
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{ALL}"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.parse()?))
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Products passing both the category predicate and the search term, in catalog order.
///
/// The term matches case-insensitively as a substring of either the name or the description;
/// an empty (or blank) term matches everything.
pub fn filter<'a>(
    products: &'a [Product],
    category: CategoryFilter,
    search_term: &str,
) -> Vec<&'a Product> {
    let term = search_term.trim().to_lowercase();
    products
        .iter()
        .filter(|p| category.accepts(p))
        .filter(|p| {
            term.is_empty()
                || p.name.to_lowercase().contains(&term)
                || p.description.to_lowercase().contains(&term)
        })
        .collect()
}
