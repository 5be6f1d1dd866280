use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{NewOrder, Order};

#[derive(Debug, Serialize, Deserialize)]
struct OrdersFile {
    #[serde(default)]
    orders: Vec<Order>,
}

/// Append-only order store. Appends serialize behind the mutex so ids
/// stay unique and creation order stays consistent; the store is written
/// back to its JSON file after every append.
#[derive(Clone)]
pub struct OrdersStore {
    orders: Arc<Mutex<Vec<Order>>>,
    path: Arc<PathBuf>,
}

impl OrdersStore {
    /// A missing or unreadable orders file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let orders = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<OrdersFile>(&raw).ok())
            .map(|file| file.orders)
            .unwrap_or_default();

        OrdersStore {
            orders: Arc::new(Mutex::new(orders)),
            path: Arc::new(path),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates the payload, assigns the generated id and timestamp,
    /// appends, persists, and returns the stored record.
    pub fn create(&self, payload: NewOrder) -> Result<Order, ApiError> {
        validate_payload(&payload)?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: payload.user_id,
            items: payload.items,
            total_amount: payload.total_amount,
            status: payload.status,
            notes: payload.notes,
            metadata: payload.metadata,
            created_at: Utc::now(),
        };

        let mut orders = self.orders.lock().unwrap();
        orders.push(order.clone());
        self.persist(&orders);
        Ok(order)
    }

    /// Every stored order, in creation order.
    pub fn list_all(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    /// Orders whose userId matches exactly, in creation order. An unknown
    /// user yields an empty list, never an error.
    pub fn list_by_user(&self, user_id: &str) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }

    fn persist(&self, orders: &[Order]) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("failed to create orders directory: {e}");
                return;
            }
        }
        let file = OrdersFile {
            orders: orders.to_vec(),
        };
        match serde_json::to_string_pretty(&file) {
            Ok(json) => {
                if let Err(e) = fs::write(self.path.as_ref(), json) {
                    tracing::warn!("failed to persist orders to {}: {e}", self.path.display());
                }
            }
            Err(e) => tracing::warn!("failed to serialize orders: {e}"),
        }
    }
}

fn validate_payload(payload: &NewOrder) -> Result<(), ApiError> {
    if payload.user_id.trim().is_empty() {
        return Err(ApiError::Validation(
            "Field 'userId' must not be empty".to_string(),
        ));
    }
    for item in &payload.items {
        if item.quantity < 1 {
            return Err(ApiError::Validation(
                "Item 'quantity' must be greater than or equal to 1".to_string(),
            ));
        }
        if let Some(price) = item.price {
            if price < 0.0 {
                return Err(ApiError::Validation(
                    "Item 'price' must not be negative".to_string(),
                ));
            }
        }
    }
    if let Some(total) = payload.total_amount {
        if total < 0.0 {
            return Err(ApiError::Validation(
                "Field 'totalAmount' must not be negative".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;
    use std::collections::HashSet;

    fn payload(user_id: &str) -> NewOrder {
        NewOrder {
            user_id: user_id.to_string(),
            items: vec![OrderItem {
                product_id: "1".to_string(),
                quantity: 2,
                price: Some(9.99),
            }],
            total_amount: Some(19.98),
            status: "pending".to_string(),
            notes: None,
            metadata: serde_json::Map::new(),
        }
    }

    fn store() -> (OrdersStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (OrdersStore::load(dir.path().join("orders.json")), dir)
    }

    #[test]
    fn create_assigns_unique_id_and_timestamp() {
        let (store, _dir) = store();
        let a = store.create(payload("u1")).unwrap();
        let b = store.create(payload("u1")).unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.created_at <= b.created_at);
    }

    #[test]
    fn list_by_user_is_ordered_subset_of_list_all() {
        let (store, _dir) = store();
        store.create(payload("alice")).unwrap();
        store.create(payload("bob")).unwrap();
        store.create(payload("alice")).unwrap();

        let all = store.list_all();
        assert_eq!(all.len(), 3);

        let alice: Vec<String> = store.list_by_user("alice").iter().map(|o| o.id.clone()).collect();
        let expected: Vec<String> = all
            .iter()
            .filter(|o| o.user_id == "alice")
            .map(|o| o.id.clone())
            .collect();
        assert_eq!(alice, expected);

        assert!(store.list_by_user("nobody").is_empty());
    }

    #[test]
    fn orders_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");

        let store = OrdersStore::load(&path);
        let created = store.create(payload("alice")).unwrap();

        let reloaded = OrdersStore::load(&path);
        let all = reloaded.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].user_id, "alice");
    }

    #[test]
    fn corrupt_orders_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(OrdersStore::load(&path).is_empty());
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        let (store, _dir) = store();

        let mut bad = payload("  ");
        assert!(matches!(store.create(bad), Err(ApiError::Validation(_))));

        bad = payload("u1");
        bad.items[0].quantity = 0;
        assert!(matches!(store.create(bad), Err(ApiError::Validation(_))));

        bad = payload("u1");
        bad.items[0].price = Some(-1.0);
        assert!(matches!(store.create(bad), Err(ApiError::Validation(_))));

        bad = payload("u1");
        bad.total_amount = Some(-0.5);
        assert!(matches!(store.create(bad), Err(ApiError::Validation(_))));

        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let (store, _dir) = store();
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                (0..25)
                    .map(|_| store.create(payload(&format!("user-{i}"))).unwrap().id)
                    .collect::<Vec<_>>()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id));
            }
        }
        assert_eq!(ids.len(), 200);
        assert_eq!(store.len(), 200);
    }
}
