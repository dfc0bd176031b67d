use rand::seq::SliceRandom;
use rand::Rng;
use shop_common::Product;

/// Up to `n` featured products picked uniformly at random.
///
/// Every call shuffles again, callers wanting reproducible picks pass a seeded `rng`.
pub fn sample<'a, R: Rng + ?Sized>(
    products: &'a [Product],
    n: usize,
    rng: &mut R,
) -> Vec<&'a Product> {
    let mut featured: Vec<&Product> = products.iter().filter(|p| p.is_featured()).collect();
    featured.shuffle(rng);
    featured.truncate(n);
    featured
}

/// [`sample`] with the thread local random generator
pub fn sample_random(products: &[Product], n: usize) -> Vec<&Product> {
    sample(products, n, &mut rand::thread_rng())
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shop_common::{Price, ProductId};

    use super::*;

    fn product(id: u64, featured: Option<bool>) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_units(1),
            image: String::new(),
            category: None,
            featured,
            in_stock: None,
            specs: None,
            coins: None,
            original_link: None,
        }
    }

    /// 5 featured (ids 1..=5) and 4 not featured
    fn catalog() -> Vec<Product> {
        let mut products: Vec<_> = (1..=5).map(|i| product(i, Some(true))).collect();
        products.push(product(6, Some(false)));
        products.push(product(7, None));
        products.push(product(8, Some(false)));
        products.push(product(9, None));
        products
    }

    #[test]
    fn sample_featured_only() {
        let products = catalog();
        let featured: HashSet<ProductId> = (1..=5).map(ProductId::from).collect();
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let picked = sample_random(&products, 2);
            assert_eq!(picked.len(), 2);
            let ids: HashSet<_> = picked.iter().map(|p| p.id.clone()).collect();
            assert_eq!(ids.len(), 2, "distinct items");
            assert!(ids.is_subset(&featured));
            seen.extend(ids);
        }

        // with 200 draws every featured product shows up at least once
        assert_eq!(seen, featured);
    }

    #[test]
    fn sample_fewer_than_requested() {
        let products = catalog();
        assert_eq!(sample_random(&products, 10).len(), 5);
        assert!(sample_random(&products, 0).is_empty());
        assert!(sample_random(&[], 3).is_empty());
        assert!(sample_random(&products[5..], 3).is_empty());
    }

    #[test]
    fn seeded_sample_is_reproducible() {
        let products = catalog();
        let a = sample(&products, 3, &mut StdRng::seed_from_u64(42));
        let b = sample(&products, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
