use lemon_core::StoreError;
use lemon_db::FeedbackRepository;
use lemon_models::{CreateFeedbackDto, Feedback};
use tracing::{info, instrument};

pub struct FeedbackService;

impl FeedbackService {
    #[instrument(skip_all, fields(rating = dto.rating, kind = %dto.kind))]
    pub async fn submit(
        feedback: &dyn FeedbackRepository,
        dto: CreateFeedbackDto,
    ) -> Result<i64, StoreError> {
        let id = feedback.insert_feedback(&dto).await?;
        info!(feedback_id = id, "Feedback received");
        Ok(id)
    }

    #[instrument(skip_all)]
    pub async fn list(feedback: &dyn FeedbackRepository) -> Result<Vec<Feedback>, StoreError> {
        feedback.list_feedback().await
    }

    #[instrument(skip(feedback))]
    pub async fn get(feedback: &dyn FeedbackRepository, id: i64) -> Result<Feedback, StoreError> {
        feedback.find_feedback(id).await
    }

    #[instrument(skip(feedback))]
    pub async fn mark_read(
        feedback: &dyn FeedbackRepository,
        id: i64,
    ) -> Result<Feedback, StoreError> {
        feedback.mark_feedback_read(id).await?;
        feedback.find_feedback(id).await
    }
}
