use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Product;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// Read-only product catalog, loaded once at startup and shared across
/// request handlers. Never mutated afterwards, so clones are cheap and
/// concurrent reads need no locking.
#[derive(Clone)]
pub struct CatalogStore {
    products: Arc<Vec<Product>>,
}

impl CatalogStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        Ok(Self::from_products(file.products))
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        CatalogStore {
            products: Arc::new(products),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Unique non-empty category values, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.unique_values(|p| &p.category)
    }

    /// Unique non-empty brand values, sorted.
    pub fn brands(&self) -> Vec<String> {
        self.unique_values(|p| &p.brand)
    }

    fn unique_values(&self, field: impl Fn(&Product) -> &String) -> Vec<String> {
        self.products
            .iter()
            .map(field)
            .filter(|v| !v.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn product(id: &str, category: &str, brand: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Product {id}"),
            "category": category,
            "brand": brand,
        }))
        .unwrap()
    }

    #[test]
    fn load_reads_products_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"products": [{{"id": "1", "title": "Mascara", "price": 9.99}}]}}"#
        )
        .unwrap();

        let store = CatalogStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id("1").unwrap().title, "Mascara");
        assert!(store.find_by_id("2").is_none());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(CatalogStore::load("does/not/exist.json").is_err());
    }

    #[test]
    fn categories_and_brands_are_unique_sorted_and_skip_empty() {
        let store = CatalogStore::from_products(vec![
            product("1", "Beauty", "Essence"),
            product("2", "Groceries", ""),
            product("3", "Beauty", "Annibale Colombo"),
        ]);

        assert_eq!(store.categories(), vec!["Beauty", "Groceries"]);
        assert_eq!(store.brands(), vec!["Annibale Colombo", "Essence"]);
    }
}
