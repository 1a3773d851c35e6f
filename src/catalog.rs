//! Product selections served by the storefront landing page.

use crate::models::Product;

pub const NEW_COLLECTION_SIZE: usize = 8;
pub const POPULAR_SIZE: usize = 4;
pub const POPULAR_CATEGORY: &str = "women";

/// Drops the first product, then keeps the last eight of the rest.
pub fn new_collection(products: Vec<Product>) -> Vec<Product> {
    let remainder: Vec<Product> = products.into_iter().skip(1).collect();
    let start = remainder.len().saturating_sub(NEW_COLLECTION_SIZE);
    remainder.into_iter().skip(start).collect()
}

/// First four products of an already category-filtered list.
pub fn popular(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().take(POPULAR_SIZE).collect()
}
