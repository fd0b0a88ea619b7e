//! Shared state handed to every handler.

use crate::render::PageRenderer;
use daytrip_application::RecommendationService;
use daytrip_core::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(service: Arc<RecommendationService>) -> Result<Self> {
        Ok(Self {
            service,
            renderer: Arc::new(PageRenderer::new()?),
        })
    }
}
