use shop_common::ProductId;

use crate::nav::Route;
use crate::Config;

/// Absolute link to the page of the product with the given id
pub fn share_url(config: &Config, id: &ProductId) -> String {
    let path = Route::Product(id.clone()).path(&config.base_path);
    format!("{}{path}", config.origin.trim_end_matches('/'))
}
