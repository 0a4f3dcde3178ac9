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

//! # Catalog Pricing
//!
//! This library provides a product catalog with compound percentage
//! discounts, VAT-inclusive pricing, and an exactly-once discount
//! application contract that holds under concurrent callers.
//!
//! ## Core Components
//!
//! - [`Catalog`]: Central engine storing products and applying discounts
//! - [`DiscountLedger`]: Concurrent store enforcing the (product, discount)
//!   uniqueness constraint
//! - [`VatTable`]: Fixed country-to-VAT-rate table with case-insensitive lookup
//! - [`CatalogError`]: Error types for catalog operation failures
//!
//! ## Example
//!
//! ```
//! use catalog_pricing_rs::{ApplyOutcome, Catalog, Discount, DiscountId, ProductId};
//! use rust_decimal_macros::dec;
//!
//! let catalog = Catalog::default();
//! catalog
//!     .add_product(ProductId::from("p1"), "Espresso Machine", dec!(100.00), "Sweden")
//!     .unwrap();
//!
//! // Apply a 10% discount
//! let discount = Discount::new(DiscountId::from("SUMMER10"), dec!(10));
//! let (outcome, product) = catalog
//!     .apply_discount(&ProductId::from("p1"), discount.clone())
//!     .unwrap();
//! assert_eq!(outcome, ApplyOutcome::Applied);
//! assert_eq!(product.final_price, dec!(112.50));
//!
//! // Applying the same discount again is a no-op success
//! let (outcome, product) = catalog
//!     .apply_discount(&ProductId::from("p1"), discount)
//!     .unwrap();
//! assert_eq!(outcome, ApplyOutcome::AlreadyApplied);
//! assert_eq!(product.discounts.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! The catalog handles concurrent access throughout. The idempotency
//! guarantee is enforced by the ledger's atomic insert-or-detect-conflict,
//! so it holds for any number of parallel callers.

mod base;
mod catalog;
pub mod error;
mod ledger;
pub mod pricing;
mod product;
pub mod vat;

pub use base::{DiscountId, ProductId};
pub use catalog::{ApplyOutcome, Catalog};
pub use error::{CatalogError, StoreError};
pub use ledger::DiscountLedger;
pub use product::{Discount, PricedProduct, Product};
pub use vat::VatTable;
