//! Supported currency listing.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Response for the currency listing.
#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    /// Supported codes in lexicographic order.
    pub currencies: Vec<String>,
}

/// GET `/currencies`
async fn list_currencies(State(state): State<AppState>) -> Json<CurrenciesResponse> {
    let currencies = state
        .wallet
        .get_supported_currencies()
        .into_iter()
        .map(String::from)
        .collect();
    Json(CurrenciesResponse { currencies })
}

/// Creates the currency routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/currencies", get(list_currencies))
}
