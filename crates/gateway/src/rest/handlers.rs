use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use umbra_core::PoolStatistics;
use umbra_ports::Clock;

use crate::data_api::DataApi;
use crate::error::FunctionError;
use crate::functions::{
    ActivateAgentCommand, ActivateAgentUseCase, CreateDepositCommand, CreateDepositUseCase,
    DepositReceipt, GenerateStealthAddressCommand, GenerateStealthAddressUseCase,
    GetPoolStatsUseCase, StealthAddressReceipt,
};
use crate::rest::{ApiError, dto::*};

use super::AppState;

type ApiResult<T> = Result<Json<FunctionResponse<T>>, ApiError>;

/// OPTIONS on any function
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// POST /functions/v1/activate-agent
pub async fn activate_agent<D: DataApi + 'static, C: Clock + 'static>(
    State(state): State<Arc<AppState<D, C>>>,
    body: Bytes,
) -> ApiResult<Value> {
    ensure_ready(&state)?;
    let command: ActivateAgentCommand = parse_body(&body)?;

    let use_case = ActivateAgentUseCase::new(Arc::clone(&state.data_api), Arc::clone(&state.clock));
    let outcome = use_case.execute(command).await?;

    Ok(Json(FunctionResponse::with_message(
        outcome.message(),
        outcome.data(),
    )))
}

/// POST /functions/v1/create-deposit
pub async fn create_deposit<D: DataApi + 'static, C: Clock + 'static>(
    State(state): State<Arc<AppState<D, C>>>,
    body: Bytes,
) -> ApiResult<DepositReceipt> {
    ensure_ready(&state)?;
    let command: CreateDepositCommand = parse_body(&body)?;

    let use_case = CreateDepositUseCase::new(
        Arc::clone(&state.data_api),
        Arc::clone(&state.clock),
        state.confirmation_delay,
    );
    let receipt = use_case.execute(command).await?;

    Ok(Json(FunctionResponse::with_message(
        "Deposit initiated successfully",
        receipt,
    )))
}

/// POST /functions/v1/generate-stealth-address
pub async fn generate_stealth_address<D: DataApi + 'static, C: Clock + 'static>(
    State(state): State<Arc<AppState<D, C>>>,
    body: Bytes,
) -> ApiResult<StealthAddressReceipt> {
    ensure_ready(&state)?;
    let command: GenerateStealthAddressCommand = parse_body(&body)?;

    let use_case = GenerateStealthAddressUseCase::new(Arc::clone(&state.data_api));
    let receipt = use_case.execute(command).await?;

    Ok(Json(FunctionResponse::with_message(
        "Stealth address generated successfully",
        receipt,
    )))
}

/// GET|POST /functions/v1/get-pool-stats
pub async fn get_pool_stats<D: DataApi + 'static, C: Clock + 'static>(
    State(state): State<Arc<AppState<D, C>>>,
) -> ApiResult<PoolStatistics> {
    ensure_ready(&state)?;

    let use_case = GetPoolStatsUseCase::new(Arc::clone(&state.data_api));
    let stats = use_case.execute().await?;

    Ok(Json(FunctionResponse::ok(stats)))
}

fn ensure_ready<D: DataApi, C: Clock>(state: &AppState<D, C>) -> Result<(), ApiError> {
    state
        .data_api
        .ready()
        .map_err(|e| ApiError::from(FunctionError::from(e)))
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, FunctionError> {
    serde_json::from_slice(body).map_err(|e| FunctionError::InvalidBody(e.to_string()))
}
