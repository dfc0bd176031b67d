//! Routes of the site and the navigation bar.

use serde::Serialize;
use shop_common::ProductId;

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "id", rename_all = "camelCase")]
pub enum Route {
    Home,
    Shop,
    Product(ProductId),
    Cart,
    Wishlist,
    NotFound(String),
}

impl Route {
    /// Parse a path of the site, with or without the `base_path` prefix.
    ///
    /// Query string and fragment are ignored.
    pub fn parse(path: &str, base_path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let base = base_path.trim_end_matches('/');
        let relative = if !base.is_empty() && (path == base || path.starts_with(&format!("{base}/")))
        {
            &path[base.len()..]
        } else {
            path
        };

        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["shop"] => Route::Shop,
            ["cart"] => Route::Cart,
            ["wishlist"] => Route::Wishlist,
            ["product", id] => match id.parse() {
                Ok(id) => Route::Product(id),
                Err(_) => Route::NotFound(relative.to_string()),
            },
            _ => Route::NotFound(relative.to_string()),
        }
    }

    /// The absolute path of the route under `base_path`
    pub fn path(&self, base_path: &str) -> String {
        let base = base_path.trim_end_matches('/');
        match self {
            Route::Home => format!("{base}/"),
            Route::Shop => format!("{base}/shop"),
            Route::Product(id) => format!("{base}/product/{id}"),
            Route::Cart => format!("{base}/cart"),
            Route::Wishlist => format!("{base}/wishlist"),
            Route::NotFound(path) => format!("{base}/{}", path.trim_start_matches('/')),
        }
    }

    /// The navigation entry highlighted when this route is shown
    fn section(&self) -> Option<Route> {
        match self {
            Route::Home | Route::Shop | Route::Cart | Route::Wishlist => Some(self.clone()),
            Route::Product(_) => Some(Route::Shop),
            Route::NotFound(_) => None,
        }
    }
}

/// An entry of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: String,
    pub active: bool,
}

/// The navigation bar, with the entry of `current` marked active.
///
/// A product page highlights "Shop", an unknown page highlights nothing.
pub fn nav_links(current: &Route, base_path: &str) -> Vec<NavLink> {
    let section = current.section();
    [
        ("Home", Route::Home),
        ("Shop", Route::Shop),
        ("Cart", Route::Cart),
        ("Wishlist", Route::Wishlist),
    ]
    .into_iter()
    .map(|(label, route)| NavLink {
        label,
        path: route.path(base_path),
        active: section.as_ref() == Some(&route),
    })
    .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const BASE: &str = "/summer-of-making-shop-rewards/";

    #[test]
    fn parse_routes() {
        assert_eq!(Route::parse("/", BASE), Route::Home);
        assert_eq!(Route::parse("", BASE), Route::Home);
        assert_eq!(Route::parse(BASE, BASE), Route::Home);
        assert_eq!(
            Route::parse("/summer-of-making-shop-rewards", BASE),
            Route::Home
        );
        assert_eq!(Route::parse("/shop", BASE), Route::Shop);
        assert_eq!(
            Route::parse("/summer-of-making-shop-rewards/shop?category=electric", BASE),
            Route::Shop
        );
        assert_eq!(
            Route::parse("/summer-of-making-shop-rewards/product/3", BASE),
            Route::Product(3.into())
        );
        assert_eq!(
            Route::parse("/product/sticker-pack/", BASE),
            Route::Product("sticker-pack".parse().unwrap())
        );
        assert_eq!(Route::parse("/cart", BASE), Route::Cart);
        assert_eq!(Route::parse("/wishlist#top", BASE), Route::Wishlist);
        assert_eq!(
            Route::parse("/checkout", BASE),
            Route::NotFound("/checkout".into())
        );
        assert_eq!(
            Route::parse("/product", BASE),
            Route::NotFound("/product".into())
        );
        // a path merely sharing the prefix is not under the base
        assert_eq!(
            Route::parse("/summer-of-making-shop-rewards-old/shop", BASE),
            Route::NotFound("/summer-of-making-shop-rewards-old/shop".into())
        );
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::Home.path(BASE), BASE);
        assert_eq!(
            Route::Product(7.into()).path(BASE),
            "/summer-of-making-shop-rewards/product/7"
        );
        assert_eq!(Route::Cart.path("/"), "/cart");
        assert_eq!(Route::Home.path("/"), "/");

        for route in [Route::Home, Route::Shop, Route::Cart, Route::Product(2.into())] {
            assert_eq!(Route::parse(&route.path(BASE), BASE), route);
        }
    }

    #[test]
    fn active_link() {
        let active = |route: Route| -> Vec<&'static str> {
            nav_links(&route, BASE)
                .into_iter()
                .filter(|l| l.active)
                .map(|l| l.label)
                .collect()
        };
        assert_eq!(active(Route::Home), ["Home"]);
        assert_eq!(active(Route::Shop), ["Shop"]);
        assert_eq!(active(Route::Product(1.into())), ["Shop"]);
        assert_eq!(active(Route::Wishlist), ["Wishlist"]);
        assert!(active(Route::NotFound("/x".into())).is_empty());

        let links = nav_links(&Route::Home, BASE);
        assert_eq!(links.len(), 4);
        assert_eq!(links[1].path, "/summer-of-making-shop-rewards/shop");
    }
}
