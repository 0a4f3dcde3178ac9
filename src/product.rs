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

//! Product and discount records.
//!
//! # Example
//!
//! ```
//! use catalog_pricing_rs::{Discount, DiscountId};
//! use rust_decimal_macros::dec;
//!
//! let discount = Discount::new(DiscountId::from("SUMMER10"), dec!(10));
//! assert_eq!(discount.percent, dec!(10));
//! ```

use crate::base::{DiscountId, ProductId};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

/// A percentage discount applied to one product.
///
/// Immutable once recorded. The percent is validated by the catalog before
/// the discount reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub percent: Decimal,
}

impl Discount {
    pub fn new(id: DiscountId, percent: Decimal) -> Self {
        Self { id, percent }
    }
}

/// Catalog product record.
///
/// Created once (seed/admin) and never mutated afterwards; the applied
/// discounts live in the ledger, not on the record. The VAT rate is resolved
/// from the rate table when the product is created, so pricing a product
/// never needs another country lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub base_price: Decimal,
    pub country: String,
    pub vat_rate: Decimal,
}

impl Product {
    pub(crate) fn new(
        id: ProductId,
        name: String,
        base_price: Decimal,
        country: String,
        vat_rate: Decimal,
    ) -> Self {
        Self {
            id,
            name,
            base_price,
            country,
            vat_rate,
        }
    }
}

/// Read model: a product together with its computed prices.
///
/// Every product surfaced by the catalog is wrapped in this snapshot, so a
/// caller never sees a product without its VAT-inclusive final price and
/// the discounts that produced it. Discounts appear in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedProduct {
    pub id: ProductId,
    pub name: String,
    pub country: String,
    pub base_price: Decimal,
    pub discounts: Vec<Discount>,
    pub total_discount_percent: Decimal,
    pub final_price: Decimal,
}

impl PricedProduct {
    /// Monetary fields round to cents on serialization.
    const PRICE_PRECISION: u32 = 2;
    /// Percent fields keep a little more detail.
    const PERCENT_PRECISION: u32 = 4;
}

impl Serialize for PricedProduct {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PricedProduct", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("country", &self.country)?;
        state.serialize_field(
            "base_price",
            &self.base_price.round_dp(PricedProduct::PRICE_PRECISION),
        )?;
        state.serialize_field("discounts", &self.discounts)?;
        state.serialize_field(
            "total_discount_percent",
            &self
                .total_discount_percent
                .round_dp(PricedProduct::PERCENT_PRECISION),
        )?;
        state.serialize_field(
            "final_price",
            &self.final_price.round_dp(PricedProduct::PRICE_PRECISION),
        )?;
        state.end()
    }
}
