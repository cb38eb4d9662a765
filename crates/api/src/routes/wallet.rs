//! Balance, deposit, and withdrawal routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;

use super::AmountResponse;
use crate::{ApiError, AppState};

/// Creates the wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/balance", get(get_balance))
        .route("/wallet/deposit", post(deposit))
        .route("/wallet/withdraw", post(withdraw))
}

/// Query parameters for a balance read.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// Currency to express the balance in. Defaults to the base currency.
    pub currency: Option<String>,
}

/// Request body for deposits and withdrawals.
#[derive(Debug, Deserialize)]
pub struct MoneyRequest {
    /// Amount in major units, e.g. `12.50`.
    pub amount: f64,
    /// ISO 4217 currency code of `amount`.
    pub currency: String,
}

/// GET `/wallet/balance`
async fn get_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<AmountResponse>, ApiError> {
    let currency = query
        .currency
        .unwrap_or_else(|| state.wallet.base_currency().to_string());
    let amount = state.wallet.get_balance(&currency).await?;
    Ok(Json(AmountResponse {
        amount,
        currency: currency.trim().to_ascii_uppercase(),
    }))
}

/// POST `/wallet/deposit`
async fn deposit(
    State(state): State<AppState>,
    Json(payload): Json<MoneyRequest>,
) -> Result<Json<AmountResponse>, ApiError> {
    let amount = state.wallet.deposit(payload.amount, &payload.currency).await?;
    info!(currency = %payload.currency, "Deposit request completed");
    Ok(Json(AmountResponse {
        amount,
        currency: state.wallet.base_currency().to_string(),
    }))
}

/// POST `/wallet/withdraw`
async fn withdraw(
    State(state): State<AppState>,
    Json(payload): Json<MoneyRequest>,
) -> Result<Json<AmountResponse>, ApiError> {
    let amount = state.wallet.withdraw(payload.amount, &payload.currency).await?;
    info!(currency = %payload.currency, "Withdraw request completed");
    Ok(Json(AmountResponse {
        amount,
        currency: state.wallet.base_currency().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;

    use crate::test_support::{send, test_state};

    #[tokio::test]
    async fn test_deposit_then_balance() {
        let state = test_state();

        let (status, json) = send(
            &state,
            "POST",
            "/api/v1/wallet/deposit",
            Some(r#"{"amount": 100, "currency": "USD"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["amount"], "100.00");
        assert_eq!(json["currency"], "USD");

        let (status, json) = send(&state, "GET", "/api/v1/wallet/balance?currency=eur", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["amount"], "90.00");
        assert_eq!(json["currency"], "EUR");

        let (_, json) = send(&state, "GET", "/api/v1/wallet/balance", None).await;
        assert_eq!(json["amount"], "100.00");
        assert_eq!(json["currency"], "USD");
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_funds() {
        let state = test_state();
        send(
            &state,
            "POST",
            "/api/v1/wallet/deposit",
            Some(r#"{"amount": 100, "currency": "USD"}"#),
        )
        .await;

        let (status, json) = send(
            &state,
            "POST",
            "/api/v1/wallet/withdraw",
            Some(r#"{"amount": 150, "currency": "USD"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "INSUFFICIENT_FUNDS");

        let (_, json) = send(&state, "GET", "/api/v1/wallet/balance", None).await;
        assert_eq!(json["amount"], "100.00");
    }

    #[tokio::test]
    async fn test_withdraw_foreign_currency() {
        let state = test_state();
        send(
            &state,
            "POST",
            "/api/v1/wallet/deposit",
            Some(r#"{"amount": 100, "currency": "USD"}"#),
        )
        .await;

        let (status, json) = send(
            &state,
            "POST",
            "/api/v1/wallet/withdraw",
            Some(r#"{"amount": 20, "currency": "EUR"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["amount"], "78.00");
    }

    #[rstest]
    #[case(r#"{"amount": -5, "currency": "USD"}"#, "INVALID_AMOUNT")]
    #[case(r#"{"amount": 0, "currency": "USD"}"#, "INVALID_AMOUNT")]
    #[case(r#"{"amount": 10.001, "currency": "USD"}"#, "INVALID_AMOUNT")]
    #[case(r#"{"amount": 10, "currency": "XYZ"}"#, "UNKNOWN_CURRENCY")]
    #[case(r#"{"amount": 10, "currency": "dollars"}"#, "UNKNOWN_CURRENCY")]
    #[tokio::test]
    async fn test_deposit_rejections(#[case] body: &str, #[case] code: &str) {
        let state = test_state();
        let (status, json) = send(&state, "POST", "/api/v1/wallet/deposit", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], code);

        let (_, json) = send(&state, "GET", "/api/v1/wallet/balance", None).await;
        assert_eq!(json["amount"], "0.00");
    }

    #[tokio::test]
    async fn test_balance_without_rate_is_503() {
        let state = test_state();
        let (status, json) = send(&state, "GET", "/api/v1/wallet/balance?currency=JPY", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "RATE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let state = test_state();
        let (status, _) = send(
            &state,
            "POST",
            "/api/v1/wallet/deposit",
            Some(r#"{"amount": "lots"}"#),
        )
        .await;
        assert!(status.is_client_error());
    }
}
