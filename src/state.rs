use std::sync::Arc;
use std::time::Duration;

use crate::services::SummaryPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SummaryPipeline>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(pipeline: SummaryPipeline, request_timeout: Duration) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            request_timeout,
        }
    }
}
