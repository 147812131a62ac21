//! Questionnaire steps

use crate::core::RequestExecutor;
use crate::envelope::ApiResponse;
use crate::fallback::{with_local_fallback, Operation};
use crate::models::Question;

use super::common::ServiceContext;

const LIST: Operation = Operation::substitute("questions", "list");
const GET: Operation = Operation::substitute("questions", "get").not_found_message("Question not found");

/// Access to the questionnaire
pub struct QuestionsService<E> {
    context: ServiceContext<E>,
}

impl<E> Clone for QuestionsService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<E: RequestExecutor> QuestionsService<E> {
    pub fn new(context: ServiceContext<E>) -> Self {
        Self { context }
    }

    pub async fn list(&self) -> ApiResponse<Vec<Question>> {
        let url = self.context.endpoints.questions();
        with_local_fallback(&LIST, self.context.executor.get(&url), || {
            Some(self.context.dataset.questions().to_vec())
        })
        .await
    }

    pub async fn get(&self, id: u32) -> ApiResponse<Question> {
        let url = self.context.endpoints.question(id);
        with_local_fallback(&GET, self.context.executor.get(&url), || {
            self.context
                .dataset
                .questions()
                .iter()
                .find(|question| question.id == id)
                .cloned()
        })
        .await
    }
}
