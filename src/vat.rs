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

//! VAT rate table.
//!
//! A fixed, read-only mapping from country name to a VAT rate in [0, 1).
//! Country matching is case-insensitive: keys are stored normalized
//! (trim + lowercase) and every lookup normalizes the same way, so the
//! rate lookup and the support check can never disagree.
//!
//! The table is constructed at process start and passed explicitly to the
//! [`Catalog`](crate::Catalog); there is no global instance.

use crate::error::CatalogError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Read-only country-to-VAT-rate mapping.
#[derive(Debug, Clone)]
pub struct VatTable {
    /// Rates keyed by normalized country name.
    rates: HashMap<String, Decimal>,
}

impl VatTable {
    /// Builds a table from (country, rate) pairs, normalizing keys.
    pub fn from_rates<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(country, rate)| (normalize(country.as_ref()), rate))
                .collect(),
        }
    }

    /// The built-in European rate table used by the demo and the CLI.
    pub fn builtin() -> Self {
        Self::from_rates([
            ("sweden", dec!(0.25)),
            ("france", dec!(0.20)),
            ("germany", dec!(0.19)),
            ("italy", dec!(0.22)),
            ("spain", dec!(0.21)),
        ])
    }

    /// Looks up the VAT rate for a country.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedCountry`] (carrying the original,
    /// un-normalized input) when the country is not in the table.
    pub fn rate(&self, country: &str) -> Result<Decimal, CatalogError> {
        self.rates
            .get(&normalize(country))
            .copied()
            .ok_or_else(|| CatalogError::UnsupportedCountry(country.to_string()))
    }

    /// Whether a country is present in the table. Same normalization as
    /// [`rate`](Self::rate).
    pub fn supports(&self, country: &str) -> bool {
        self.rates.contains_key(&normalize(country))
    }
}

impl Default for VatTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Canonical country key: trimmed and lowercased. Used for every country
/// comparison in the crate so lookups and filters cannot diverge.
pub(crate) fn normalize(country: &str) -> String {
    country.trim().to_lowercase()
}
