//! Shared application state for axum handlers.

use std::sync::Arc;

use airhub_app::ports::ReadingRepository;
use airhub_app::services::reading_service::ReadingService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying type itself does not need to be
/// `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Reading record/query service.
    pub reading_service: Arc<ReadingService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            reading_service: Arc::clone(&self.reading_service),
        }
    }
}

impl<R> AppState<R>
where
    R: ReadingRepository + Send + Sync + 'static,
{
    /// Create a new application state from the service instance.
    pub fn new(reading_service: ReadingService<R>) -> Self {
        Self {
            reading_service: Arc::new(reading_service),
        }
    }
}
