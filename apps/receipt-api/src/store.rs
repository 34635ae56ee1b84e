//! In-memory receipt storage. Receipts live until the process exits.

use std::collections::HashMap;

use chrono::Utc;
use fairshare_core::Receipt;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ReceiptStore {
    receipts: RwLock<HashMap<String, Receipt>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a receipt and returns the stored copy.
    ///
    /// A blank id is replaced with a fresh UUID v4; `created_at` is stamped
    /// when missing.
    pub async fn save(&self, mut receipt: Receipt) -> Receipt {
        if receipt.id.trim().is_empty() {
            receipt.id = Uuid::new_v4().to_string();
        }
        receipt.created_at.get_or_insert_with(Utc::now);

        self.receipts
            .write()
            .await
            .insert(receipt.id.clone(), receipt.clone());
        receipt
    }

    pub async fn get(&self, id: &str) -> Option<Receipt> {
        self.receipts.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.receipts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.receipts.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairshare_core::{LineItem, Money};

    #[tokio::test]
    async fn save_assigns_id_and_timestamp() {
        let store = ReceiptStore::new();
        let saved = store
            .save(Receipt::new("", vec![LineItem::single("Milk", Money::from_cents(349))]))
            .await;

        assert!(Uuid::parse_str(&saved.id).is_ok());
        assert!(saved.created_at.is_some());
        assert_eq!(store.get(&saved.id).await, Some(saved));
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = ReceiptStore::new();
        let a = store.save(Receipt::new("", vec![])).await;
        let b = store.save(Receipt::new("", vec![])).await;

        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn existing_id_is_kept() {
        let store = ReceiptStore::new();
        let saved = store.save(Receipt::new("fixed", vec![])).await;

        assert_eq!(saved.id, "fixed");
        assert!(store.get("missing").await.is_none());
        assert!(!store.is_empty().await);
    }
}
