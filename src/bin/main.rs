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

use catalog_pricing_rs::{Catalog, Discount, DiscountId, PricedProduct, ProductId};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

/// Catalog Pricing - Seed a catalog from CSV and print priced products
///
/// Reads products and discount applications from a CSV file and outputs
/// the resulting priced catalog to stdout.
#[derive(Parser, Debug)]
#[command(name = "catalog-pricing-rs")]
#[command(about = "Prices a product catalog from a CSV seed file", long_about = None)]
struct Args {
    /// Path to CSV file with products and discounts
    ///
    /// Expected format: type,product,name,price,country,discount,percent
    /// Example: cargo run -- seed.csv > priced.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Open input file
    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // Seed the catalog from CSV
    let catalog = match seed_catalog(BufReader::new(file)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error reading seed file: {}", e);
            process::exit(1);
        }
    };

    // Write results to stdout
    if let Err(e) = write_products(&catalog, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `type, product, name, price, country, discount, percent`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "type")]
    row_type: String,
    product: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    price: Option<Decimal>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    discount: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    percent: Option<Decimal>,
}

/// A row interpreted as a catalog operation.
#[derive(Debug)]
enum Operation {
    AddProduct {
        id: ProductId,
        name: String,
        price: Decimal,
        country: String,
    },
    ApplyDiscount {
        id: ProductId,
        discount: Discount,
    },
}

impl CsvRecord {
    /// Converts a CSV record into a catalog operation.
    ///
    /// Returns `None` for unknown row types or missing required fields.
    fn into_operation(self) -> Option<Operation> {
        let id = ProductId(self.product);

        match self.row_type.to_lowercase().as_str() {
            "product" => Some(Operation::AddProduct {
                id,
                name: self.name?,
                price: self.price?,
                country: self.country?,
            }),
            "discount" => Some(Operation::ApplyDiscount {
                id,
                discount: Discount::new(DiscountId(self.discount?), self.percent?),
            }),
            _ => None,
        }
    }
}

/// Seed a catalog from a CSV reader.
///
/// This function uses streaming parsing to handle arbitrarily large seed
/// files without loading the entire file into memory. Malformed rows and
/// invalid operations are skipped.
///
/// # CSV Format
///
/// Expected columns: `type, product, name, price, country, discount, percent`
/// - `type`: Row type (product, discount)
/// - `product`: Product ID (string)
/// - `name`, `price`, `country`: Product rows only
/// - `discount`, `percent`: Discount rows only
///
/// # Example
///
/// ```csv
/// type,product,name,price,country,discount,percent
/// product,p1,Espresso Machine,100.00,Sweden,,
/// discount,p1,,,,SUMMER10,10
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
/// Individual operation errors are logged in debug mode but don't stop
/// processing.
pub fn seed_catalog<R: Read>(reader: R) -> Result<Catalog, csv::Error> {
    let catalog = Catalog::default();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All) // Handle whitespace in fields like " product "
        .flexible(true) // Allow short discount rows
        .has_headers(true) // Skip first row as header
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                // Convert CSV record to a catalog operation
                let Some(op) = record.into_operation() else {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping invalid seed row");
                    continue;
                };

                // Apply operation, ignoring errors (silent failure)
                let result = match op {
                    Operation::AddProduct {
                        id,
                        name,
                        price,
                        country,
                    } => catalog.add_product(id, &name, price, &country).map(|_| ()),
                    Operation::ApplyDiscount { id, discount } => {
                        catalog.apply_discount(&id, discount).map(|_| ())
                    }
                };

                if let Err(_e) = result {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping row: {}", _e);
                }
            }
            Err(e) => {
                // Skip malformed rows
                #[cfg(debug_assertions)]
                eprintln!("Skipping malformed row: {}", e);
                continue;
            }
        }
    }

    Ok(catalog)
}

/// Flat output row for the priced catalog report.
///
/// Columns: `id, name, country, base_price, discounts, total_discount_percent, final_price`
#[derive(Debug, Serialize)]
struct OutputRow {
    id: ProductId,
    name: String,
    country: String,
    base_price: Decimal,
    /// Applied discounts as `id:percent` pairs joined with `;`.
    discounts: String,
    total_discount_percent: Decimal,
    final_price: Decimal,
}

impl From<PricedProduct> for OutputRow {
    fn from(product: PricedProduct) -> Self {
        let discounts = product
            .discounts
            .iter()
            .map(|d| format!("{}:{}", d.id, d.percent))
            .collect::<Vec<_>>()
            .join(";");

        OutputRow {
            id: product.id,
            name: product.name,
            country: product.country,
            base_price: product.base_price.round_dp(2),
            discounts,
            total_discount_percent: product.total_discount_percent.round_dp(4),
            final_price: product.final_price.round_dp(2),
        }
    }
}

/// Write the priced catalog to a CSV writer.
///
/// Outputs all products in creation order with prices rounded to cents.
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_products<W: Write>(catalog: &Catalog, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for product in catalog.products() {
        wtr.serialize(OutputRow::from(product))?;
    }

    // Flush to ensure all data is written
    wtr.flush()?;
    Ok(())
}
