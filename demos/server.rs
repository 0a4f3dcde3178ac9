//! Simple REST API server example for the catalog pricing engine.
//!
//! Run with: `cargo run --example server`
//!
//! ## Endpoints
//!
//! - `POST /products` - Create a product
//! - `GET /products` - List all products (optionally `?country=Sweden`)
//! - `GET /products/:id` - Get a product by ID
//! - `POST /products/:id/discounts` - Apply a discount (idempotent)
//!
//! ## Example Usage
//!
//! ```bash
//! # Create a product
//! curl -X POST http://localhost:3000/products \
//!   -H "Content-Type: application/json" \
//!   -d '{"id": "p9", "name": "Milk Frother", "base_price": "40.00", "country": "Sweden"}'
//!
//! # Apply a discount (run it twice: first 201 applied, then 200 already_applied)
//! curl -X POST http://localhost:3000/products/p1/discounts \
//!   -H "Content-Type: application/json" \
//!   -d '{"discount_id": "SUMMER10", "percent": "10"}'
//!
//! # List products in a country
//! curl 'http://localhost:3000/products?country=Sweden'
//!
//! # Get a product
//! curl http://localhost:3000/products/p1
//! ```

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog_pricing_rs::{
    ApplyOutcome, Catalog, CatalogError, Discount, DiscountId, PricedProduct, ProductId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

// === Request/Response DTOs ===

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub id: String,
    pub name: String,
    pub base_price: Decimal,
    pub country: String,
}

/// Request body for applying a discount.
#[derive(Debug, Deserialize)]
pub struct ApplyDiscountRequest {
    pub discount_id: String,
    pub percent: Decimal,
}

/// Response body for a discount application.
#[derive(Debug, Serialize)]
pub struct ApplyDiscountResponse {
    pub status: ApplyOutcome,
    pub product: PricedProduct,
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub country: Option<String>,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the catalog.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

// === Error Handling ===

/// Wrapper for converting `CatalogError` into HTTP responses.
pub struct AppError(CatalogError);

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            CatalogError::UnsupportedCountry(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_COUNTRY"),
            CatalogError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND"),
            CatalogError::DuplicateProduct(_) => (StatusCode::CONFLICT, "DUPLICATE_PRODUCT"),
            CatalogError::EmptyDiscountId | CatalogError::InvalidPercent(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_DISCOUNT")
            }
            CatalogError::InvalidBasePrice(_) => (StatusCode::BAD_REQUEST, "INVALID_BASE_PRICE"),
            CatalogError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAULT"),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /products - Create a new product.
async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<PricedProduct>), AppError> {
    let product = state.catalog.add_product(
        ProductId(request.id),
        &request.name,
        request.base_price,
        &request.country,
    )?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products - List products, optionally filtered by country.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PricedProduct>>, AppError> {
    let products = match params.country {
        Some(country) => state.catalog.list_products_by_country(&country)?,
        None => state.catalog.products(),
    };
    Ok(Json(products))
}

/// GET /products/:id - Get a product by ID.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PricedProduct>, AppError> {
    let product_id = ProductId(id);

    state
        .catalog
        .get_product(&product_id)
        .map(Json)
        .ok_or_else(|| AppError(CatalogError::ProductNotFound(product_id)))
}

/// POST /products/:id/discounts - Apply a discount to a product.
///
/// Returns 201 when this call applied the discount and 200 when it was
/// already applied; the body shape is identical either way.
async fn apply_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ApplyDiscountRequest>,
) -> Result<(StatusCode, Json<ApplyDiscountResponse>), AppError> {
    let discount = Discount::new(DiscountId(request.discount_id), request.percent);
    let (status, product) = state.catalog.apply_discount(&ProductId(id), discount)?;

    let http_status = match status {
        ApplyOutcome::Applied => StatusCode::CREATED,
        ApplyOutcome::AlreadyApplied => StatusCode::OK,
    };

    Ok((http_status, Json(ApplyDiscountResponse { status, product })))
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}/discounts", post(apply_discount))
        .with_state(state)
}

/// Seed a few demo products so the endpoints have data to serve.
fn seed(catalog: &Catalog) {
    let seed = [
        ("p1", "Espresso Machine", dec!(100.00), "Sweden"),
        ("p2", "Grinder", dec!(200.00), "France"),
        ("p3", "Kettle", dec!(150.00), "Germany"),
    ];
    for (id, name, price, country) in seed {
        if let Err(e) = catalog.add_product(ProductId::from(id), name, price, country) {
            eprintln!("Seed failed for {}: {}", id, e);
        }
    }
}

// === Main ===

#[tokio::main]
async fn main() {
    let catalog = Arc::new(Catalog::default());
    seed(&catalog);

    let state = AppState { catalog };
    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    println!("Catalog pricing API server running on http://127.0.0.1:3000");
    println!();
    println!("Endpoints:");
    println!("  POST /products                 - Create a product");
    println!("  GET  /products[?country=X]     - List products");
    println!("  GET  /products/:id             - Get a product by ID");
    println!("  POST /products/:id/discounts   - Apply a discount");

    axum::serve(listener, app).await.unwrap();
}
