//! Recording analysis service for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId};
use crate::ports::AnalysisService;

/// Test double that records every analysis call instead of making one.
#[derive(Default)]
pub struct RecordingAnalysisService {
    start_calls: Mutex<Vec<TalkSessionId>>,
    generate_calls: Mutex<Vec<TalkSessionId>>,
    fail_next_start: AtomicBool,
}

impl RecordingAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions passed to `start_analysis` so far.
    pub fn start_calls(&self) -> Vec<TalkSessionId> {
        self.start_calls.lock().unwrap().clone()
    }

    /// Sessions passed to `generate_report` so far.
    pub fn generate_calls(&self) -> Vec<TalkSessionId> {
        self.generate_calls.lock().unwrap().clone()
    }

    /// Makes the next `start_analysis` call return an error.
    pub fn fail_next_start(&self) {
        self.fail_next_start.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AnalysisService for RecordingAnalysisService {
    async fn start_analysis(&self, talk_session_id: TalkSessionId) -> Result<(), DomainError> {
        self.start_calls.lock().unwrap().push(talk_session_id);
        if self.fail_next_start.swap(false, Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::ExternalServiceError,
                "Simulated analysis failure",
            ));
        }
        Ok(())
    }

    async fn generate_report(&self, talk_session_id: TalkSessionId) -> Result<(), DomainError> {
        self.generate_calls.lock().unwrap().push(talk_session_id);
        Ok(())
    }
}
