use std::sync::Arc;

use crate::application::services::NarrationService;

#[derive(Clone)]
pub struct AppState {
    pub narration_service: Arc<NarrationService>,
}

impl AppState {
    pub fn new(narration_service: NarrationService) -> Self {
        Self {
            narration_service: Arc::new(narration_service),
        }
    }
}
