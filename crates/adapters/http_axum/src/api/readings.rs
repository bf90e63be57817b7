//! JSON REST handlers for sensor readings.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use airhub_app::ports::ReadingRepository;
use airhub_domain::device::DeviceId;
use airhub_domain::error::{AirHubError, ValidationError};
use airhub_domain::reading::{DeletionResult, Reading};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for recording a reading: temperature, pressure, humidity.
#[derive(Deserialize)]
pub struct CreateReadingRequest {
    pub air: [f64; 3],
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Reading>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the single-reading endpoints.
pub enum GetResponse {
    Ok(Json<Reading>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the latest-per-device endpoint.
pub enum LatestAllResponse {
    Ok(Json<BTreeMap<DeviceId, Reading>>),
}

impl IntoResponse for LatestAllResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Reading>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoints.
pub enum DeleteResponse {
    Ok(Json<DeletionResult>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Parse a device id path segment, returning a validation error on failure.
fn parse_device_id(raw: &str) -> Result<DeviceId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(AirHubError::Validation(ValidationError::InvalidDeviceId(
            raw.to_owned(),
        )))
    })
}

/// `GET /api/data/latest`
pub async fn latest_all<R>(State(state): State<AppState<R>>) -> Result<LatestAllResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let map = state.reading_service.latest_all().await?;
    Ok(LatestAllResponse::Ok(Json(map)))
}

/// `GET /api/data/:id`
pub async fn list<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let readings = state.reading_service.query(device_id).await?;
    Ok(ListResponse::Ok(Json(readings)))
}

/// `GET /api/data/:id/latest`
pub async fn latest<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let reading = state.reading_service.latest(device_id).await?;
    Ok(GetResponse::Ok(Json(reading)))
}

/// `GET /api/data/:id/:num` — the `num` most recent readings, newest first.
pub async fn recent<R>(
    State(state): State<AppState<R>>,
    Path((id, num)): Path<(String, String)>,
) -> Result<ListResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let count: usize = num.parse().map_err(|_| {
        ApiError::from(AirHubError::Validation(ValidationError::InvalidCount(
            num.clone(),
        )))
    })?;
    let readings = state.reading_service.recent(device_id, count).await?;
    Ok(ListResponse::Ok(Json(readings)))
}

/// `POST /api/data/:id`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<CreateReadingRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let [temperature, pressure, humidity] = req.air;

    let reading = Reading::builder()
        .device_id(device_id)
        .temperature(temperature)
        .pressure(pressure)
        .humidity(humidity)
        .build();

    let created = state.reading_service.record(reading).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/data/all`
pub async fn delete_all<R>(State(state): State<AppState<R>>) -> Result<DeleteResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let result = state.reading_service.delete_all().await?;
    Ok(DeleteResponse::Ok(Json(result)))
}

/// `DELETE /api/data/:id`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let result = state.reading_service.delete(device_id).await?;
    Ok(DeleteResponse::Ok(Json(result)))
}
