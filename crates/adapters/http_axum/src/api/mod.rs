//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod readings;

use axum::Router;
use axum::routing::{delete, get};

use airhub_app::ports::ReadingRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// The static segments (`latest`, `all`) take precedence over the dynamic
/// `{id}` routes.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/data/latest", get(readings::latest_all::<R>))
        .route("/data/all", delete(readings::delete_all::<R>))
        .route(
            "/data/{id}",
            get(readings::list::<R>)
                .post(readings::create::<R>)
                .delete(readings::delete::<R>),
        )
        .route("/data/{id}/latest", get(readings::latest::<R>))
        .route("/data/{id}/{num}", get(readings::recent::<R>))
}
