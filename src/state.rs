//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::MappingRepository;

/// URL service over whichever store backend was selected at startup.
pub type SharedUrlService = Arc<UrlService<dyn MappingRepository>>;

/// State shared by all request handlers.
///
/// Holds the only long-lived resource of the process: the store handle,
/// reached through the URL service. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub url_service: SharedUrlService,
}

impl AppState {
    /// Builds the state around an already opened store.
    pub fn new(store: Arc<dyn MappingRepository>, base_url: impl Into<String>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(store, base_url)),
        }
    }
}
