use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;

/// Direct children of a category, or the roots when no parent is given
pub struct GetCategoryChildrenHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl GetCategoryChildrenHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, parent_id: Option<i64>) -> Result<Vec<Category>> {
        if let Some(parent_id) = parent_id {
            if self.repository.find_by_id(parent_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Category with id {} not found",
                    parent_id
                )));
            }
        }

        self.repository.find_by_parent_id(parent_id).await
    }
}
