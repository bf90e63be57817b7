//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use airhub_app::ports::ReadingRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the reading API under `/api` and a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: ReadingRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use airhub_app::services::reading_service::ReadingService;
    use airhub_domain::device::{DeviceId, DeviceRegistry};
    use airhub_domain::error::AirHubError;
    use airhub_domain::reading::Reading;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct StubReadingRepo;

    impl ReadingRepository for StubReadingRepo {
        async fn insert(&self, reading: Reading) -> Result<Reading, AirHubError> {
            Ok(reading)
        }
        async fn find_by_device(&self, _device_id: DeviceId) -> Result<Vec<Reading>, AirHubError> {
            Ok(vec![])
        }
        async fn find_recent(
            &self,
            _device_id: DeviceId,
            _limit: usize,
        ) -> Result<Vec<Reading>, AirHubError> {
            Ok(vec![])
        }
        async fn find_latest(&self, _device_id: DeviceId) -> Result<Option<Reading>, AirHubError> {
            Ok(None)
        }
        async fn find_latest_per_device(&self) -> Result<Vec<Reading>, AirHubError> {
            Ok(vec![])
        }
        async fn delete_by_device(&self, _device_id: DeviceId) -> Result<u64, AirHubError> {
            Ok(0)
        }
    }

    fn test_state() -> AppState<StubReadingRepo> {
        AppState::new(ReadingService::new(StubReadingRepo, DeviceRegistry::new(4)))
    }

    async fn send(uri: &str, method: &str) -> StatusCode {
        let app = build(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        assert_eq!(send("/health", "GET").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_ok_when_listing_known_device() {
        assert_eq!(send("/api/data/1", "GET").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_id_not_numeric() {
        assert_eq!(send("/api/data/first", "GET").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_when_device_outside_registry() {
        assert_eq!(send("/api/data/99", "GET").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_route_latest_segment_before_dynamic_count() {
        // /data/{id}/latest must win over /data/{id}/{num}
        assert_eq!(send("/api/data/0/latest", "GET").await, StatusCode::NOT_FOUND);
        assert_eq!(send("/api/data/0/3", "GET").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_count_not_numeric() {
        assert_eq!(send("/api/data/0/many", "GET").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_ok_when_deleting_all() {
        assert_eq!(send("/api/data/all", "DELETE").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_ok_when_deleting_device() {
        assert_eq!(send("/api/data/2", "DELETE").await, StatusCode::OK);
    }
}
