//! JSON handler for the anagram check.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use devstock_app::ports::{CounterStore, InventoryStore, RandomSource};

use crate::api::Empty;
use crate::error::ApiError;
use crate::state::AppState;

/// Query string of the anagram check. Both parameters are required;
/// empty values are accepted.
#[derive(Deserialize)]
pub struct CheckQuery {
    pub str1: String,
    pub str2: String,
}

/// Possible responses from the check endpoint.
///
/// The match result is deliberately not part of the body; it is only
/// observable through the counter.
pub enum CheckResponse {
    Ok(Json<Empty>),
}

impl IntoResponse for CheckResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /is_anagram/?str1=..&str2=..`
pub async fn check<C, S, R>(
    State(state): State<AppState<C, S, R>>,
    Query(query): Query<CheckQuery>,
) -> Result<CheckResponse, ApiError>
where
    C: CounterStore + Send + Sync + 'static,
    S: InventoryStore + Send + Sync + 'static,
    R: RandomSource + 'static,
{
    state
        .anagram_service
        .check(&query.str1, &query.str2)
        .await?;
    Ok(CheckResponse::Ok(Json(Empty::default())))
}
