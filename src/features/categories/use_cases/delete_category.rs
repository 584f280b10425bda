use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::repositories::CategoryRepository;

/// Removes a category. Its children stay and become roots.
pub struct DeleteCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i64) -> Result<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        tracing::info!(id, "Category deleted");
        Ok(())
    }
}
