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

//! Property-based tests for pricing and discount application.
//!
//! These tests verify invariants that should hold for any set of valid
//! discount percents.

use catalog_pricing_rs::pricing::{compound_discount_percent, final_price};
use catalog_pricing_rs::{ApplyOutcome, Catalog, Discount, DiscountId, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a valid discount percent in (0, 100] with 2 decimal places.
fn arb_percent() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Generate a percent strictly below 100.
fn arb_partial_percent() -> impl Strategy<Value = Decimal> {
    (1i64..=9_999i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Generate a positive base price (0.01 to 10000.00).
fn arb_base_price() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate a VAT rate in [0, 0.50) with 2 decimal places.
fn arb_vat_rate() -> impl Strategy<Value = Decimal> {
    (0i64..50i64).prop_map(|points| Decimal::new(points, 2))
}

fn discounts_from(percents: &[Decimal]) -> Vec<Discount> {
    percents
        .iter()
        .enumerate()
        .map(|(i, percent)| Discount::new(DiscountId(format!("d{}", i)), *percent))
        .collect()
}

// =============================================================================
// Compound Discount Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Total discount percent never decreases as discounts are added.
    #[test]
    fn compound_percent_is_monotone(
        percents in prop::collection::vec(arb_percent(), 1..8),
    ) {
        let discounts = discounts_from(&percents);

        let mut previous = Decimal::ZERO;
        for end in 1..=discounts.len() {
            let current = compound_discount_percent(&discounts[..end]);
            prop_assert!(current >= previous, "{} < {}", current, previous);
            previous = current;
        }
    }

    /// Total discount percent stays below 100 while every percent does.
    #[test]
    fn compound_percent_below_hundred(
        percents in prop::collection::vec(arb_partial_percent(), 1..8),
    ) {
        let discounts = discounts_from(&percents);
        prop_assert!(compound_discount_percent(&discounts) < dec!(100));
    }

    /// Compounding never discounts more than the sum of percents.
    #[test]
    fn compound_percent_at_most_additive(
        percents in prop::collection::vec(arb_percent(), 1..6),
    ) {
        let discounts = discounts_from(&percents);
        let additive: Decimal = percents.iter().copied().sum();
        prop_assert!(compound_discount_percent(&discounts) <= additive);
    }

    /// Order of discounts does not change the final price.
    #[test]
    fn final_price_is_order_independent(
        base in arb_base_price(),
        vat in arb_vat_rate(),
        percents in prop::collection::vec(arb_percent(), 2..6),
    ) {
        let forward = discounts_from(&percents);
        let mut backward = forward.clone();
        backward.reverse();

        prop_assert_eq!(
            final_price(base, vat, &forward),
            final_price(base, vat, &backward)
        );
    }

    /// With no discounts the final price is exactly base * (1 + VAT).
    #[test]
    fn empty_discounts_price_is_base_plus_vat(
        base in arb_base_price(),
        vat in arb_vat_rate(),
    ) {
        prop_assert_eq!(final_price(base, vat, &[]), base * (Decimal::ONE + vat));
    }

    /// Final price is never negative and never exceeds the undiscounted price.
    #[test]
    fn final_price_is_bounded(
        base in arb_base_price(),
        vat in arb_vat_rate(),
        percents in prop::collection::vec(arb_percent(), 0..6),
    ) {
        let discounts = discounts_from(&percents);
        let price = final_price(base, vat, &discounts);

        prop_assert!(price >= Decimal::ZERO);
        prop_assert!(price <= final_price(base, vat, &[]));
    }
}

// =============================================================================
// Idempotency Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// First application is Applied, every repeat is AlreadyApplied, and
    /// exactly one record exists regardless of how often it is re-sent.
    #[test]
    fn repeated_application_records_once(
        percent in arb_percent(),
        repeats in 1usize..5,
    ) {
        let catalog = Catalog::default();
        catalog
            .add_product(ProductId::from("p1"), "Espresso Machine", dec!(100.00), "Sweden")
            .unwrap();

        let discount = Discount::new(DiscountId::from("PROMO"), percent);

        let (first, _) = catalog
            .apply_discount(&ProductId::from("p1"), discount.clone())
            .unwrap();
        prop_assert_eq!(first, ApplyOutcome::Applied);

        for _ in 0..repeats {
            let (outcome, product) = catalog
                .apply_discount(&ProductId::from("p1"), discount.clone())
                .unwrap();
            prop_assert_eq!(outcome, ApplyOutcome::AlreadyApplied);
            prop_assert_eq!(product.discounts.len(), 1);
        }
    }

    /// The catalog's price for a product always equals the pure pricing
    /// function applied to its discount set.
    #[test]
    fn catalog_price_matches_pricing_engine(
        base in arb_base_price(),
        percents in prop::collection::vec(arb_percent(), 0..5),
    ) {
        let catalog = Catalog::default();
        catalog
            .add_product(ProductId::from("p1"), "Espresso Machine", base, "Sweden")
            .unwrap();

        for (i, percent) in percents.iter().enumerate() {
            catalog
                .apply_discount(
                    &ProductId::from("p1"),
                    Discount::new(DiscountId(format!("d{}", i)), *percent),
                )
                .unwrap();
        }

        let product = catalog.get_product(&ProductId::from("p1")).unwrap();
        prop_assert_eq!(
            product.final_price,
            final_price(base, dec!(0.25), &product.discounts)
        );
        prop_assert_eq!(
            product.total_discount_percent,
            compound_discount_percent(&product.discounts)
        );
    }

    /// Distinct discount identifiers all apply, whatever their percents.
    #[test]
    fn distinct_ids_all_apply(
        percents in prop::collection::vec(arb_percent(), 1..8),
    ) {
        let catalog = Catalog::default();
        catalog
            .add_product(ProductId::from("p1"), "Espresso Machine", dec!(100.00), "Sweden")
            .unwrap();

        for (i, percent) in percents.iter().enumerate() {
            let (outcome, _) = catalog
                .apply_discount(
                    &ProductId::from("p1"),
                    Discount::new(DiscountId(format!("d{}", i)), *percent),
                )
                .unwrap();
            prop_assert_eq!(outcome, ApplyOutcome::Applied);
        }

        let product = catalog.get_product(&ProductId::from("p1")).unwrap();
        prop_assert_eq!(product.discounts.len(), percents.len());
    }
}
