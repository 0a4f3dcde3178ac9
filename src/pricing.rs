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

//! Price computation.
//!
//! Pure functions over [`Decimal`]: no I/O, no failure modes. VAT lookup
//! failures are handled at the [`VatTable`](crate::VatTable) boundary before
//! any of these run.
//!
//! Discounts compound multiplicatively, not additively: each discount
//! applies to the price left by the previous ones, so the remaining factor
//! is `Π(1 - dᵢ/100)`. Multiplication commutes, so the order in which
//! discounts were applied does not change the result.

use crate::product::Discount;
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Fraction of the base price remaining after all discounts.
fn remaining_factor(discounts: &[Discount]) -> Decimal {
    discounts
        .iter()
        .fold(Decimal::ONE, |factor, discount| {
            factor * (Decimal::ONE - discount.percent / HUNDRED)
        })
}

/// Effective total discount percent of a set of compounded discounts.
///
/// Strictly below 100 whenever every individual percent is below 100, and
/// non-decreasing as discounts are added.
pub fn compound_discount_percent(discounts: &[Discount]) -> Decimal {
    (Decimal::ONE - remaining_factor(discounts)) * HUNDRED
}

/// VAT-inclusive final price: `base * Π(1 - dᵢ/100) * (1 + vat_rate)`.
///
/// With no discounts this reduces to `base * (1 + vat_rate)`.
pub fn final_price(base_price: Decimal, vat_rate: Decimal, discounts: &[Discount]) -> Decimal {
    base_price * remaining_factor(discounts) * (Decimal::ONE + vat_rate)
}
