//! Canonical in-memory product records.

use ahash::AHashMap;

use crate::types::Product;

/// The authoritative in-process copy of the catalog, keyed by product id.
///
/// Exactly one entry exists per id; inserting an existing id replaces the
/// record and hands the previous version back so derived indices can be
/// cleaned up.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: AHashMap<String, Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product, returning the previous record if any.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.product_id.clone(), product)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Product> {
        self.products.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn product(id: &str, title: &str) -> Product {
        Product {
            product_id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            categories: Vec::new(),
            price_cents: 1000,
            currency: "USD".to_string(),
            images: Vec::new(),
            stock: 0,
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_insert_replaces_and_returns_previous() {
        let mut store = ProductStore::new();
        check!(store.insert(product("P1", "Alpha")).is_none());

        let previous = store.insert(product("P1", "Beta"));
        check!(previous.unwrap().title == "Alpha");
        check!(store.len() == 1);
        check!(store.get("P1").unwrap().title == "Beta");
    }

    #[test]
    fn test_remove() {
        let mut store = ProductStore::new();
        store.insert(product("P1", "Alpha"));

        check!(store.remove("P1").is_some());
        check!(store.remove("P1").is_none());
        check!(store.is_empty());
    }
}
