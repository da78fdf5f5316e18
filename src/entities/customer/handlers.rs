//! Customer HTTP handlers

use super::model::{Credentials, CustomerProfile, RegisterCustomer};
use crate::core::{ServiceResult, ValidationError};
use crate::server::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn parse_body<T: DeserializeOwned>(payload: Value) -> Result<T, ValidationError> {
    serde_json::from_value(payload).map_err(|e| {
        let mut err = ValidationError::new();
        err.push("payload", e.to_string());
        err
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ServiceResult<(StatusCode, Json<CustomerProfile>)> {
    let form: RegisterCustomer = parse_body(payload)?;
    let profile = state.customers.register(form).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ServiceResult<Json<CustomerProfile>> {
    let credentials: Credentials = parse_body(payload)?;
    let profile = state
        .customers
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(profile))
}
