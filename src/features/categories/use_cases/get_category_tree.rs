use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::use_cases::{build_category_tree, category_tree_depth};
use crate::shared::constants::MAX_CATEGORY_TREE_DEPTH;

/// Loads every category and nests it under its parent.
///
/// Fails with a validation error when the hierarchy is deeper than
/// [`MAX_CATEGORY_TREE_DEPTH`] levels.
pub struct GetCategoryTreeHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl GetCategoryTreeHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Category>> {
        let categories = self.repository.fetch_all().await?;
        tracing::debug!(count = categories.len(), "Building category tree");
        let forest = build_category_tree(categories);

        let depth = category_tree_depth(&forest);
        if depth > MAX_CATEGORY_TREE_DEPTH {
            tracing::warn!(depth, "Category tree too deep to render");
            return Err(AppError::Validation(format!(
                "Category tree is {} levels deep, the maximum is {}",
                depth, MAX_CATEGORY_TREE_DEPTH
            )));
        }

        Ok(forest)
    }
}
