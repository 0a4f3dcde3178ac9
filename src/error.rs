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

//! Error types for catalog and ledger operations.

use crate::base::{DiscountId, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Storage-layer errors reported by the discount ledger.
///
/// A constraint violation is a distinct variant so callers can classify it
/// structurally instead of matching on error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The (product, discount) key already exists in the ledger.
    #[error("uniqueness constraint violated for ({product_id}, {discount_id})")]
    ConstraintViolation {
        product_id: ProductId,
        discount_id: DiscountId,
    },

    /// The store could not service the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Catalog operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Country is not present in the VAT rate table
    #[error("unsupported country: {0}")]
    UnsupportedCountry(String),

    /// Referenced product does not exist
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A product with this identifier already exists
    #[error("product already exists: {0}")]
    DuplicateProduct(ProductId),

    /// Discount identifier is empty
    #[error("discount identifier must not be empty")]
    EmptyDiscountId,

    /// Discount percent is outside (0, 100]
    #[error("discount percent must be in (0, 100], got {0}")]
    InvalidPercent(Decimal),

    /// Base price is negative
    #[error("base price must be non-negative, got {0}")]
    InvalidBasePrice(Decimal),

    /// Storage fault other than a uniqueness conflict
    #[error("storage fault: {0}")]
    Storage(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, StoreError};
    use crate::base::{DiscountId, ProductId};
    use rust_decimal_macros::dec;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            CatalogError::UnsupportedCountry("Atlantis".to_string()).to_string(),
            "unsupported country: Atlantis"
        );
        assert_eq!(
            CatalogError::ProductNotFound(ProductId::from("p9")).to_string(),
            "product not found: p9"
        );
        assert_eq!(
            CatalogError::DuplicateProduct(ProductId::from("p1")).to_string(),
            "product already exists: p1"
        );
        assert_eq!(
            CatalogError::EmptyDiscountId.to_string(),
            "discount identifier must not be empty"
        );
        assert_eq!(
            CatalogError::InvalidPercent(dec!(101)).to_string(),
            "discount percent must be in (0, 100], got 101"
        );
        assert_eq!(
            CatalogError::InvalidBasePrice(dec!(-1)).to_string(),
            "base price must be non-negative, got -1"
        );
    }

    #[test]
    fn store_error_names_the_key() {
        let err = StoreError::ConstraintViolation {
            product_id: ProductId::from("p1"),
            discount_id: DiscountId::from("SUMMER10"),
        };
        assert_eq!(
            err.to_string(),
            "uniqueness constraint violated for (p1, SUMMER10)"
        );
    }

    #[test]
    fn store_faults_wrap_into_catalog_errors() {
        let err: CatalogError = StoreError::Unavailable("connection reset".to_string()).into();
        assert_eq!(err.to_string(), "storage fault: storage unavailable: connection reset");
    }

    #[test]
    fn errors_are_cloneable() {
        let error = CatalogError::EmptyDiscountId;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
