pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path the site is served under, every route and share link is relative to it
pub const DEFAULT_BASE_PATH: &str = "/summer-of-making-shop-rewards/";

pub const DEFAULT_ORIGIN: &str = "https://summer.hackclub.com";

/// How many featured products the home page shows
pub const DEFAULT_FEATURED_COUNT: usize = 3;

/// Catalog shipped with the build, shape `{ "products": [...] }`
pub const BUNDLED_CATALOG: &str = include_str!("../data/products.json");

pub const DATADIR_NAME: &str = ".som-shop";
