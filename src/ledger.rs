// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Thread-safe discount ledger with a uniqueness constraint.
//!
//! The ledger is the authoritative record of which discounts have been
//! applied to which products. Its single write path is an atomic
//! insert-or-detect-conflict keyed by (product, discount); there is no
//! separate "check then insert" anywhere, so N concurrent identical
//! applications resolve to exactly one insert and N-1 conflicts.

use crate::base::{DiscountId, ProductId};
use crate::error::StoreError;
use crate::product::Discount;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Ledger key: one discount application on one product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ApplicationKey {
    product_id: ProductId,
    discount_id: DiscountId,
}

/// Concurrent store of applied discounts.
///
/// Combines a [`DashMap`] keyed by (product, discount) for O(1) conflict
/// detection with a per-product list preserving application order. The
/// ordered list is appended while the entry guard for the key is still
/// held, so once a conflicting writer observes the key it also observes
/// the discount in the product's list.
#[derive(Debug, Default)]
pub struct DiscountLedger {
    /// Applications keyed by (product, discount); the uniqueness constraint.
    applications: DashMap<ApplicationKey, Decimal>,

    /// Applied discounts per product, in application order.
    per_product: DashMap<ProductId, Vec<Discount>>,
}

impl DiscountLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            applications: DashMap::new(),
            per_product: DashMap::new(),
        }
    }

    /// Records a discount application.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConstraintViolation`] if the (product,
    /// discount) pair is already recorded. The caller decides what a
    /// conflict means; the ledger only reports it.
    pub fn record(&self, product_id: &ProductId, discount: Discount) -> Result<(), StoreError> {
        let key = ApplicationKey {
            product_id: product_id.clone(),
            discount_id: discount.id.clone(),
        };

        // Entry API gives an atomic check-and-insert; the guard is held
        // across the ordered-list append so conflicting writers never see
        // the key without the list entry.
        match self.applications.entry(key) {
            Entry::Occupied(_) => Err(StoreError::ConstraintViolation {
                product_id: product_id.clone(),
                discount_id: discount.id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(discount.percent);
                self.per_product
                    .entry(product_id.clone())
                    .or_default()
                    .push(discount);
                Ok(())
            }
        }
    }

    /// Applied discounts for a product, in application order.
    ///
    /// Products with no applications yield an empty list.
    pub fn discounts_for(&self, product_id: &ProductId) -> Vec<Discount> {
        self.per_product
            .get(product_id)
            .map(|discounts| discounts.value().clone())
            .unwrap_or_default()
    }

    /// Whether a (product, discount) pair has been recorded.
    pub fn contains(&self, product_id: &ProductId, discount_id: &DiscountId) -> bool {
        self.applications.contains_key(&ApplicationKey {
            product_id: product_id.clone(),
            discount_id: discount_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn discount(id: &str, percent: Decimal) -> Discount {
        Discount::new(DiscountId::from(id), percent)
    }

    #[test]
    fn record_then_conflict() {
        let ledger = DiscountLedger::new();
        let product = ProductId::from("p1");

        ledger.record(&product, discount("d1", dec!(10))).unwrap();
        let err = ledger.record(&product, discount("d1", dec!(10))).unwrap_err();

        assert_eq!(
            err,
            StoreError::ConstraintViolation {
                product_id: product.clone(),
                discount_id: DiscountId::from("d1"),
            }
        );
        assert_eq!(ledger.discounts_for(&product).len(), 1);
    }

    #[test]
    fn conflict_checks_percent_is_ignored() {
        // Idempotency keys on the identifier pair, not the payload.
        let ledger = DiscountLedger::new();
        let product = ProductId::from("p1");

        ledger.record(&product, discount("d1", dec!(10))).unwrap();
        assert!(ledger.record(&product, discount("d1", dec!(20))).is_err());

        // First writer's percent is what is kept
        assert_eq!(ledger.discounts_for(&product)[0].percent, dec!(10));
    }

    #[test]
    fn same_discount_id_on_different_products() {
        let ledger = DiscountLedger::new();
        ledger
            .record(&ProductId::from("p1"), discount("SUMMER10", dec!(10)))
            .unwrap();
        ledger
            .record(&ProductId::from("p2"), discount("SUMMER10", dec!(10)))
            .unwrap();

        assert!(ledger.contains(&ProductId::from("p1"), &DiscountId::from("SUMMER10")));
        assert!(ledger.contains(&ProductId::from("p2"), &DiscountId::from("SUMMER10")));
    }

    #[test]
    fn discounts_keep_application_order() {
        let ledger = DiscountLedger::new();
        let product = ProductId::from("p1");

        for (id, percent) in [("c", dec!(1)), ("a", dec!(2)), ("b", dec!(3))] {
            ledger.record(&product, discount(id, percent)).unwrap();
        }

        let ids: Vec<String> = ledger
            .discounts_for(&product)
            .into_iter()
            .map(|d| d.id.0)
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn unknown_product_has_no_discounts() {
        let ledger = DiscountLedger::new();
        assert!(ledger.discounts_for(&ProductId::from("missing")).is_empty());
    }
}
