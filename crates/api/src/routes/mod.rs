//! API route definitions.

use axum::Router;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;

pub mod convert;
pub mod currencies;
pub mod health;
pub mod wallet;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(currencies::routes())
        .merge(wallet::routes())
        .merge(convert::routes())
}

/// An amount with the currency it is denominated in.
#[derive(Debug, Serialize)]
pub struct AmountResponse {
    /// Decimal amount, serialized as a string to keep its precision.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}
