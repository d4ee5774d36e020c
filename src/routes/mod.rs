pub mod predict;
pub mod price;
pub mod query;
pub mod system;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(price::routes())
        .merge(predict::routes())
        .merge(system::routes())
}
