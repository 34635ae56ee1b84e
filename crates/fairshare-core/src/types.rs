//! # Receipt Model
//!
//! The parsed bill as delivered by the receipt service.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Receipt Lifecycle                               │
//! │                                                                         │
//! │  receipt-api ──► JSON ──► Receipt (loaded once per bill view)          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                     BillSession (read-only)                             │
//! │                              │                                          │
//! │                              ▼                                          │
//! │           Allocation reads items[].total_price only                    │
//! │           subtotal / tax / total are display-only                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No invariant ties `quantity * unit_price` to `total_price`: printed
//! receipts carry discounts and fees, so the line total is taken verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Line Item
// =============================================================================

/// One purchased entry on a receipt.
///
/// ## JSON Shape
/// ```json
/// { "description": "Pizza", "quantity": 1, "unitPrice": 20.0, "totalPrice": 20.0 }
/// ```
///
/// Prices are held in whole cents. A wire amount with sub-cent digits is
/// rounded to the nearest cent on load (`0.125` becomes `0.13`), and an
/// amount above [`Money::MAX_AMOUNT`] fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Description as printed on the receipt.
    pub description: String,

    /// Purchased quantity.
    pub quantity: u32,

    /// Price of a single unit.
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub unit_price: Money,

    /// Line total; the only figure the allocation reads.
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub total_price: Money,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        total_price: Money,
    ) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            total_price,
        }
    }

    /// Creates a single-quantity line item where unit and total price match.
    pub fn single(description: impl Into<String>, price: Money) -> Self {
        LineItem::new(description, 1, price, price)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A parsed receipt: ordered line items plus optional printed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    /// Identifier assigned by the receipt service.
    pub id: String,

    /// Line items in printed order. Positions are the item indices used by
    /// the attribution matrix.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Printed subtotal, if the parser found one.
    #[serde(default, with = "money::dollars_opt")]
    #[ts(type = "number | null")]
    pub subtotal: Option<Money>,

    /// Printed tax. Never apportioned to participants.
    #[serde(default, with = "money::dollars_opt")]
    #[ts(type = "number | null")]
    pub tax: Option<Money>,

    /// Printed grand total.
    #[serde(default, with = "money::dollars_opt")]
    #[ts(type = "number | null")]
    pub total: Option<Money>,

    /// When the receipt service stored this receipt.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Receipt {
    /// Creates a receipt with items only; printed totals unknown.
    pub fn new(id: impl Into<String>, items: Vec<LineItem>) -> Self {
        Receipt {
            id: id.into(),
            items,
            subtotal: None,
            tax: None,
            total: None,
            created_at: None,
        }
    }

    /// Number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of every line total.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|item| item.total_price).sum()
    }

    /// One-line summary of the printed figures, `N/A` for absent ones.
    ///
    /// ```rust
    /// use fairshare_core::{Money, Receipt};
    ///
    /// let mut receipt = Receipt::new("r-1", vec![]);
    /// receipt.subtotal = Some(Money::from_cents(2400));
    /// assert_eq!(
    ///     receipt.totals_summary(),
    ///     "Subtotal: $24.00 | Tax: N/A | Total: N/A"
    /// );
    /// ```
    pub fn totals_summary(&self) -> String {
        format!(
            "Subtotal: {} | Tax: {} | Total: {}",
            money::format_optional(self.subtotal),
            money::format_optional(self.tax),
            money::format_optional(self.total)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserializes_wire_json() {
        let json = r#"{
            "id": "abc-123",
            "items": [
                { "description": "Pizza", "quantity": 1, "unitPrice": 20.0, "totalPrice": 20.0 },
                { "description": "Soda", "quantity": 2, "unitPrice": 2, "totalPrice": 4.0 }
            ],
            "subtotal": 24.0,
            "tax": null,
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;

        let receipt: Receipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.id, "abc-123");
        assert_eq!(receipt.item_count(), 2);
        assert_eq!(receipt.items[1].unit_price, Money::from_cents(200));
        assert_eq!(receipt.items_total(), Money::from_cents(2400));
        assert_eq!(receipt.subtotal, Some(Money::from_cents(2400)));
        assert_eq!(receipt.tax, None);
        assert_eq!(receipt.total, None); // missing field, not zero
        assert!(receipt.created_at.is_some());
    }

    #[test]
    fn test_receipt_serializes_dollars_in_camel_case() {
        let mut receipt = Receipt::new(
            "r-1",
            vec![LineItem::new(
                "Bananas",
                3,
                Money::from_cents(25),
                Money::from_cents(75),
            )],
        );
        receipt.total = Some(Money::from_cents(81));

        let value = serde_json::to_value(&receipt).unwrap();

        assert_eq!(value["items"][0]["unitPrice"], serde_json::json!(0.25));
        assert_eq!(value["items"][0]["totalPrice"], serde_json::json!(0.75));
        assert_eq!(value["total"], serde_json::json!(0.81));
        assert!(value["tax"].is_null());
    }

    #[test]
    fn test_sub_cent_wire_amounts_round_on_load() {
        let json = r#"{
            "id": "r-3",
            "items": [
                { "description": "Candy", "quantity": 8, "unitPrice": 0.015625, "totalPrice": 0.125 }
            ],
            "tax": 0.125
        }"#;

        let receipt: Receipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.items[0].total_price, Money::from_cents(13));
        assert_eq!(receipt.items[0].unit_price, Money::from_cents(2));
        assert_eq!(receipt.tax, Some(Money::from_cents(13)));
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["items"][0]["totalPrice"], serde_json::json!(0.13));
    }

    #[test]
    fn test_oversized_wire_amounts_fail_to_load() {
        let item_json = r#"{
            "id": "r-4",
            "items": [
                { "description": "Yacht", "quantity": 1, "unitPrice": 5e16, "totalPrice": 5e16 },
                { "description": "Yacht", "quantity": 1, "unitPrice": 5e16, "totalPrice": 5e16 }
            ]
        }"#;
        assert!(serde_json::from_str::<Receipt>(item_json).is_err());

        let total_json = r#"{ "id": "r-5", "items": [], "total": -5e16 }"#;
        assert!(serde_json::from_str::<Receipt>(total_json).is_err());
    }

    #[test]
    fn test_items_total_at_max_amount() {
        let items = vec![LineItem::single("Big", Money::MAX_AMOUNT); 4];
        let receipt = Receipt::new("r-6", items);
        assert_eq!(
            receipt.items_total(),
            Money::from_cents(Money::MAX_AMOUNT.cents() * 4)
        );
    }

    #[test]
    fn test_totals_summary_reports_missing_as_not_available() {
        let receipt = Receipt::new("r-2", vec![LineItem::single("Tea", Money::from_cents(300))]);
        assert_eq!(
            receipt.totals_summary(),
            "Subtotal: N/A | Tax: N/A | Total: N/A"
        );
    }
}
