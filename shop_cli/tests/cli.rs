use std::fs;

use clap::Parser;
use serde_json::Value;
use shop_cli::{inner_main, Cli};
use tempfile::TempDir;

#[track_caller]
fn sh_result(command: &str) -> anyhow::Result<Value> {
    let shell_words = shellwords::split(command).unwrap();
    let cli = Cli::try_parse_from(shell_words)?;
    inner_main(cli)
}

#[track_caller]
pub fn sh(command: &str) -> Value {
    sh_result(command).unwrap()
}

fn sh_err(command: &str) -> String {
    format!("{:?}", sh_result(command).unwrap_err())
}

/// A `shop` invocation with a fresh datadir
fn setup_cli() -> (TempDir, String) {
    let tmp = tempfile::tempdir().unwrap();
    let cli = format!("shop --datadir {}", tmp.path().display());
    (tmp, cli)
}

fn names(products: &Value) -> Vec<&str> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.get("name").unwrap().as_str().unwrap())
        .collect()
}

#[test]
fn products() {
    let r = sh("shop products");
    let products = r.get("products").unwrap().as_array().unwrap();
    assert_eq!(products.len(), 10);
    assert_eq!(products[0].get("id").unwrap(), 1);
    assert_eq!(r.get("category").unwrap(), "all");

    let r = sh("shop products --category electric --search watch");
    assert_eq!(names(r.get("products").unwrap()), ["Smart Watch"]);

    let r = sh("shop products --search '  WATCH '");
    let found = names(r.get("products").unwrap());
    assert!(found.contains(&"Smart Watch"));
    assert!(!found.contains(&"Desk Lamp"));

    let r = sh("shop products --category software --search keyboard");
    assert!(r.get("products").unwrap().as_array().unwrap().is_empty());

    // category ids are case sensitive
    let err = sh_err("shop products --category Electric");
    assert!(err.contains("Unknown category 'Electric'"), "{err}");
}

#[test]
fn categories() {
    let r = sh("shop categories");
    let categories = r.get("categories").unwrap().as_array().unwrap();
    assert_eq!(categories.len(), 7);
    assert_eq!(categories[0].get("id").unwrap(), "all");
    assert_eq!(categories[1].get("id").unwrap(), "electric");
    assert_eq!(categories[1].get("label").unwrap(), "Electronics");
}

#[test]
fn cart() {
    let (_tmp, cli) = setup_cli();

    let r = sh(&format!("{cli} cart list"));
    assert!(r.get("items").unwrap().as_array().unwrap().is_empty());
    assert_eq!(r.get("total").unwrap(), 0);

    sh(&format!("{cli} cart add 2"));
    let r = sh(&format!("{cli} cart add 2"));
    assert_eq!(names(r.get("items").unwrap()), ["Smart Watch"]);

    let r = sh(&format!("{cli} cart add 3"));
    assert_eq!(names(r.get("items").unwrap()), ["Smart Watch", "Desk Lamp"]);
    assert_eq!(r.get("total").unwrap(), 3499 + 1299);
    assert_eq!(r.get("totalCoins").unwrap(), 90 + 35);

    let r = sh(&format!("{cli} cart total"));
    assert_eq!(r.get("count").unwrap(), 2);
    assert_eq!(r.get("total").unwrap(), 4798);
    assert_eq!(r.get("totalCoins").unwrap(), 125);

    // removing an absent product is fine
    let r = sh(&format!("{cli} cart remove 9"));
    assert_eq!(r.get("items").unwrap().as_array().unwrap().len(), 2);

    let r = sh(&format!("{cli} cart remove 2"));
    assert_eq!(names(r.get("items").unwrap()), ["Desk Lamp"]);

    let err = sh_err(&format!("{cli} cart add 404"));
    assert!(err.contains("Product '404' does not exist"), "{err}");

    let r = sh(&format!("{cli} cart clear"));
    assert!(r.get("items").unwrap().as_array().unwrap().is_empty());
}

#[test]
fn wishlist_is_persisted() {
    let (tmp, cli) = setup_cli();

    let r = sh(&format!("{cli} wishlist add 7"));
    assert!(r.get("total").is_none(), "the wishlist has no total");
    assert_eq!(r.get("name").unwrap(), "wishlist");

    let stored = fs::read_to_string(tmp.path().join("wishlist.json")).unwrap();
    let stored: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(names(&stored), ["Hack Club Hoodie"]);
    assert!(!tmp.path().join("cart.json").exists());

    // a new invocation sees the stored wishlist, the cart is independent
    let r = sh(&format!("{cli} wishlist list"));
    assert_eq!(names(r.get("items").unwrap()), ["Hack Club Hoodie"]);
    let r = sh(&format!("{cli} cart list"));
    assert!(r.get("items").unwrap().as_array().unwrap().is_empty());

    // a corrupted file is an empty wishlist
    fs::write(tmp.path().join("wishlist.json"), "not json").unwrap();
    let r = sh(&format!("{cli} wishlist list"));
    assert!(r.get("items").unwrap().as_array().unwrap().is_empty());
}

#[test]
fn product() {
    let (_tmp, cli) = setup_cli();
    sh(&format!("{cli} wishlist add 4"));

    let r = sh(&format!("{cli} product 4"));
    assert_eq!(r.get("status").unwrap(), "found");
    assert_eq!(r.get("inWishlist").unwrap(), true);
    assert_eq!(r.get("inCart").unwrap(), false);
    assert_eq!(r.get("inStock").unwrap(), false);
    assert_eq!(r.get("featured").unwrap(), true);
    assert_eq!(r.get("categoryLabel").unwrap(), "Hardware & Tools");
    let product = r.get("product").unwrap();
    assert_eq!(product.get("name").unwrap(), "Soldering Iron Kit");
    assert_eq!(
        product.get("specs").unwrap().get("material").unwrap(),
        "Steel"
    );
    assert_eq!(
        r.get("shareUrl").unwrap(),
        "https://summer.hackclub.com/summer-of-making-shop-rewards/product/4"
    );

    let r = sh(&format!("{cli} product 404"));
    assert_eq!(r.get("status").unwrap(), "notFound");
    assert_eq!(r.get("id").unwrap(), 404);
}

#[test]
fn featured() {
    let r = sh("shop featured --count 2 --seed 42");
    let featured = r.get("featured").unwrap().as_array().unwrap();
    assert_eq!(featured.len(), 2);
    assert_ne!(featured[0].get("id"), featured[1].get("id"));
    for p in featured {
        assert_eq!(p.get("featured").unwrap(), true);
    }
    assert_eq!(r, sh("shop featured --count 2 --seed 42"));

    let r = sh("shop featured --count 100");
    assert_eq!(r.get("featured").unwrap().as_array().unwrap().len(), 5);

    let r = sh("shop --featured 1 featured");
    assert_eq!(r.get("featured").unwrap().as_array().unwrap().len(), 1);
}

#[test]
fn open_and_nav() {
    let (_tmp, cli) = setup_cli();

    let r = sh(&format!("{cli} open /summer-of-making-shop-rewards/ --seed 1"));
    let page = r.get("page").unwrap();
    assert_eq!(page.get("page").unwrap(), "home");
    let featured = page.get("model").unwrap().get("featured").unwrap();
    assert_eq!(featured.as_array().unwrap().len(), 3);

    sh(&format!("{cli} cart add 1"));
    let r = sh(&format!("{cli} open /cart"));
    let page = r.get("page").unwrap();
    assert_eq!(page.get("page").unwrap(), "cart");
    assert_eq!(page.get("model").unwrap().get("total").unwrap(), 7999);

    let r = sh(&format!("{cli} open /checkout"));
    assert_eq!(r.get("page").unwrap().get("page").unwrap(), "notFound");

    let r = sh("shop nav /summer-of-making-shop-rewards/product/3");
    assert_eq!(r.get("route").unwrap().get("route").unwrap(), "product");
    let active: Vec<_> = r
        .get("nav")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l.get("active").unwrap() == true)
        .map(|l| l.get("label").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(active, ["Shop"]);

    let r = sh("shop --base-path / nav /wishlist");
    let nav = r.get("nav").unwrap().as_array().unwrap();
    assert_eq!(nav[3].get("path").unwrap(), "/wishlist");
    assert_eq!(nav[3].get("active").unwrap(), true);
}

#[test]
fn share() {
    let r = sh("shop --origin http://localhost:5173 --base-path / share 2");
    assert_eq!(r.get("name").unwrap(), "Smart Watch");
    assert_eq!(r.get("url").unwrap(), "http://localhost:5173/product/2");

    let err = sh_err("shop share 404");
    assert!(err.contains("Product '404' does not exist"), "{err}");
}

#[test]
fn custom_catalog() {
    let (tmp, cli) = setup_cli();
    let path = tmp.path().join("catalog.json");
    fs::write(
        &path,
        r#"{"products": [
            {"id": "mug", "name": "Mug", "price": "4.50", "featured": true},
            {"id": "cap", "name": "Cap", "price": 3}
        ]}"#,
    )
    .unwrap();

    let cli = format!("{cli} --catalog {}", path.display());
    let r = sh(&format!("{cli} products"));
    assert_eq!(names(r.get("products").unwrap()), ["Mug", "Cap"]);

    sh(&format!("{cli} cart add mug"));
    let r = sh(&format!("{cli} cart add cap"));
    assert_eq!(r.get("total").unwrap(), 7.5);

    fs::write(&path, r#"{"products": [{"id": 1, "name": "A", "price": "Rs 10"}]}"#).unwrap();
    let err = sh_err(&format!("{cli} products"));
    assert!(err.contains("Cannot load the catalog"), "{err}");
}

#[test]
fn library_logs_reach_the_subscriber() {
    let (tmp, cli) = setup_cli();
    fs::write(tmp.path().join("cart.json"), "not json").unwrap();
    let r = sh(&format!("{cli} cart list"));
    assert!(r.get("items").unwrap().as_array().unwrap().is_empty());

    // the warning about the undecodable cart is forwarded to tracing
    assert!(log::log_enabled!(target: "shop_core", log::Level::Warn));
}

#[test]
fn completion() {
    let r = sh("shop generate-completion bash");
    assert!(r.as_str().unwrap().contains("shop"));
}
