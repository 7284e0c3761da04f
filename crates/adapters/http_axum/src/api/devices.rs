//! JSON handlers for the device inventory.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use devstock_app::ports::{CounterStore, InventoryStore, RandomSource};
use devstock_domain::device::DeviceTypeCount;

use crate::api::Empty;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DeviceTypeCount>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the generate endpoint.
pub enum GenerateResponse {
    Created(Json<Empty>),
}

impl IntoResponse for GenerateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /devices/`
pub async fn list_unattached<C, S, R>(
    State(state): State<AppState<C, S, R>>,
) -> Result<ListResponse, ApiError>
where
    C: CounterStore + Send + Sync + 'static,
    S: InventoryStore + Send + Sync + 'static,
    R: RandomSource + 'static,
{
    let rows = state.device_service.count_unattached_by_type().await?;
    Ok(ListResponse::Ok(Json(rows)))
}

/// `POST /devices/`
pub async fn generate<C, S, R>(
    State(state): State<AppState<C, S, R>>,
) -> Result<GenerateResponse, ApiError>
where
    C: CounterStore + Send + Sync + 'static,
    S: InventoryStore + Send + Sync + 'static,
    R: RandomSource + 'static,
{
    state.device_service.generate_batch().await?;
    Ok(GenerateResponse::Created(Json(Empty::default())))
}
