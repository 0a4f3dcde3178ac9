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

//! Catalog engine.
//!
//! The [`Catalog`] is the central component that stores products, applies
//! discounts exactly once, and attaches a VAT-inclusive final price to every
//! product it returns.
//!
//! # Discount Application
//!
//! Applying a discount is idempotent: the first application of a (product,
//! discount) pair is [`Applied`](ApplyOutcome::Applied), every further
//! application of the same pair is
//! [`AlreadyApplied`](ApplyOutcome::AlreadyApplied) — a success, not an
//! error — and both return the same snapshot shape of the product's current
//! state. The guarantee holds under concurrency because the check and the
//! insert are one atomic ledger operation, never a read followed by a write.
//!
//! # Thread Safety
//!
//! The catalog uses [`DashMap`]-backed storage throughout; any number of
//! callers may apply discounts and read products in parallel.

use crate::base::ProductId;
use crate::error::{CatalogError, StoreError};
use crate::ledger::DiscountLedger;
use crate::pricing;
use crate::product::{Discount, PricedProduct, Product};
use crate::vat::{self, VatTable};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of a discount application.
///
/// Both variants are successes; they differ only in whether this call was
/// the one that recorded the discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// This call recorded the discount.
    Applied,
    /// The discount was already recorded by an earlier (or concurrent) call.
    AlreadyApplied,
}

/// Product catalog with idempotent discount application.
///
/// # Operations
///
/// | Operation | Behavior |
/// |-----------|----------|
/// | `add_product` | Validates and stores a product, resolving its VAT rate |
/// | `get_product` | Looks up one product with prices attached |
/// | `list_products_by_country` | Products of one country, insertion order |
/// | `products` | All products, insertion order |
/// | `apply_discount` | Exactly-once discount application |
///
/// # Invariants
///
/// - At most one discount record exists per (product, discount) pair.
/// - Every returned [`PricedProduct`] carries the final price computed from
///   the product's current discount set.
/// - A product's country is validated against the rate table at creation;
///   pricing never fails afterwards.
pub struct Catalog {
    /// VAT rates, fixed for the lifetime of the catalog.
    vat: VatTable,
    /// Product records indexed by product ID.
    products: DashMap<ProductId, Product>,
    /// Product IDs in creation order, for stable listings.
    insertion_order: Mutex<Vec<ProductId>>,
    /// Authoritative record of applied discounts.
    ledger: DiscountLedger,
}

impl Catalog {
    /// Creates an empty catalog using the given VAT rate table.
    pub fn new(vat: VatTable) -> Self {
        Self {
            vat,
            products: DashMap::new(),
            insertion_order: Mutex::new(Vec::new()),
            ledger: DiscountLedger::new(),
        }
    }

    /// Adds a product to the catalog.
    ///
    /// The VAT rate is resolved here, once; an unknown country is rejected
    /// before anything is stored.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBasePrice`] - Base price is negative.
    /// - [`CatalogError::UnsupportedCountry`] - Country not in the rate table.
    /// - [`CatalogError::DuplicateProduct`] - Product ID already exists.
    pub fn add_product(
        &self,
        id: ProductId,
        name: &str,
        base_price: Decimal,
        country: &str,
    ) -> Result<PricedProduct, CatalogError> {
        if base_price < Decimal::ZERO {
            return Err(CatalogError::InvalidBasePrice(base_price));
        }
        let vat_rate = self.vat.rate(country)?;

        let product = Product::new(
            id.clone(),
            name.to_string(),
            base_price,
            country.to_string(),
            vat_rate,
        );

        // Entry API for atomic create-if-absent; the insertion-order append
        // happens under the entry guard so listings see products at most once.
        match self.products.entry(id.clone()) {
            Entry::Occupied(_) => Err(CatalogError::DuplicateProduct(id)),
            Entry::Vacant(slot) => {
                let priced = self.price(&product);
                slot.insert(product);
                self.insertion_order.lock().push(id);
                Ok(priced)
            }
        }
    }

    /// Retrieves a product by ID, with prices attached.
    ///
    /// Returns `None` if no product exists for the given ID.
    pub fn get_product(&self, id: &ProductId) -> Option<PricedProduct> {
        self.products.get(id).map(|product| self.price(&product))
    }

    /// Lists the products of one country in product creation order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedCountry`] when the country is not
    /// in the rate table, regardless of letter casing.
    pub fn list_products_by_country(
        &self,
        country: &str,
    ) -> Result<Vec<PricedProduct>, CatalogError> {
        if !self.vat.supports(country) {
            return Err(CatalogError::UnsupportedCountry(country.to_string()));
        }

        let wanted = vat::normalize(country);
        Ok(self
            .in_insertion_order()
            .filter(|product| vat::normalize(&product.country) == wanted)
            .map(|product| self.price(&product))
            .collect())
    }

    /// All products in creation order, with prices attached.
    pub fn products(&self) -> Vec<PricedProduct> {
        self.in_insertion_order()
            .map(|product| self.price(&product))
            .collect()
    }

    /// Applies a discount to a product, exactly once per discount ID.
    ///
    /// Validation runs before storage is touched. A ledger conflict on the
    /// (product, discount) key is the idempotent success case, not a fault:
    /// the response carries the product's current state either way. Any
    /// other storage error surfaces as [`CatalogError::Storage`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyDiscountId`] - Discount identifier is empty.
    /// - [`CatalogError::InvalidPercent`] - Percent outside (0, 100].
    /// - [`CatalogError::ProductNotFound`] - Unknown product ID.
    /// - [`CatalogError::Storage`] - Storage fault other than a conflict.
    pub fn apply_discount(
        &self,
        product_id: &ProductId,
        discount: Discount,
    ) -> Result<(ApplyOutcome, PricedProduct), CatalogError> {
        if discount.id.0.is_empty() {
            return Err(CatalogError::EmptyDiscountId);
        }
        if discount.percent <= Decimal::ZERO || discount.percent > Decimal::ONE_HUNDRED {
            return Err(CatalogError::InvalidPercent(discount.percent));
        }

        let product = self
            .products
            .get(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.clone()))?;

        let outcome = match self.ledger.record(product_id, discount) {
            Ok(()) => ApplyOutcome::Applied,
            Err(StoreError::ConstraintViolation { .. }) => ApplyOutcome::AlreadyApplied,
            Err(fault) => return Err(CatalogError::Storage(fault)),
        };

        Ok((outcome, self.price(&product)))
    }

    /// Builds the read model for a product from its current discount set.
    fn price(&self, product: &Product) -> PricedProduct {
        let discounts = self.ledger.discounts_for(&product.id);
        let total_discount_percent = pricing::compound_discount_percent(&discounts);
        let final_price = pricing::final_price(product.base_price, product.vat_rate, &discounts);

        PricedProduct {
            id: product.id.clone(),
            name: product.name.clone(),
            country: product.country.clone(),
            base_price: product.base_price,
            discounts,
            total_discount_percent,
            final_price,
        }
    }

    /// Product records in creation order.
    fn in_insertion_order(&self) -> impl Iterator<Item = Product> + '_ {
        let order = self.insertion_order.lock().clone();
        order
            .into_iter()
            .filter_map(|id| self.products.get(&id).map(|product| product.value().clone()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(VatTable::builtin())
    }
}
