//! Answers sink port (driven/secondary port)

use crate::domain::AnswersEvent;

/// Port trait for a usage-event SDK with a predefined event catalogue
pub trait IAnswersSink: Send + Sync {
    /// Logs one usage event
    fn log_answer(&self, event: &AnswersEvent);
}
