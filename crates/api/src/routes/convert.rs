//! Currency conversion route. Never touches the balance.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use super::AmountResponse;
use crate::{ApiError, AppState};

/// Request body for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Amount in major units of `from`.
    pub amount: f64,
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
}

/// POST `/convert`
async fn convert(
    State(state): State<AppState>,
    Json(payload): Json<ConvertRequest>,
) -> Result<Json<AmountResponse>, ApiError> {
    let amount = state
        .wallet
        .convert_amount(payload.amount, &payload.from, &payload.to)
        .await?;
    Ok(Json(AmountResponse {
        amount,
        currency: payload.to.trim().to_ascii_uppercase(),
    }))
}

/// Creates the conversion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/convert", post(convert))
}
