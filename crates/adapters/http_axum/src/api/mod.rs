//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod anagram;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::get;
use serde::Serialize;

use devstock_app::ports::{CounterStore, InventoryStore, RandomSource};

use crate::state::AppState;

/// Empty JSON object (`{}`) returned by endpoints that carry no payload.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

/// Build the API router.
pub fn routes<C, S, R>() -> Router<AppState<C, S, R>>
where
    C: CounterStore + Send + Sync + 'static,
    S: InventoryStore + Send + Sync + 'static,
    R: RandomSource + 'static,
{
    Router::new()
        .route("/is_anagram/", get(anagram::check::<C, S, R>))
        .route(
            "/devices/",
            get(devices::list_unattached::<C, S, R>).post(devices::generate::<C, S, R>),
        )
}
