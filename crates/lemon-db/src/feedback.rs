use async_trait::async_trait;
use lemon_core::StoreError;
use lemon_models::{CreateFeedbackDto, Feedback};

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Stores a new entry and returns its identifier.
    async fn insert_feedback(&self, dto: &CreateFeedbackDto) -> Result<i64, StoreError>;

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError>;

    async fn find_feedback(&self, id: i64) -> Result<Feedback, StoreError>;

    async fn mark_feedback_read(&self, id: i64) -> Result<(), StoreError>;
}
