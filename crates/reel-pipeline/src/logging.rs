//! Structured stage logging.
//!
//! Provides consistent, structured logging for pipeline stages with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};

/// Stage logger with consistent formatting.
///
/// Every log line carries the run id and the stage name so one run can be
/// followed across the whole pipeline.
#[derive(Debug, Clone)]
pub struct StageLogger {
    run_id: String,
    stage: String,
}

impl StageLogger {
    /// Create a logger for one stage of a run.
    pub fn new(run_id: &str, stage: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Log the start of a stage.
    pub fn start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage started: {}", message
        );
    }

    /// Log a progress update during the stage.
    pub fn progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage progress: {}", message
        );
    }

    /// Log a warning during the stage.
    pub fn warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage warning: {}", message
        );
    }

    /// Log an error during the stage.
    pub fn error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage error: {}", message
        );
    }

    /// Log the completion of a stage.
    pub fn completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage completed: {}", message
        );
    }

    /// Get the run id.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the stage name.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Create a tracing span for this stage.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "stage",
            run_id = %self.run_id,
            stage = %self.stage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_logger_accessors() {
        let logger = StageLogger::new("run-123", "fetch");
        assert_eq!(logger.run_id(), "run-123");
        assert_eq!(logger.stage(), "fetch");
    }
}
