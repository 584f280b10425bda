use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CategoryName, NameLengthPolicy};
use crate::features::categories::repositories::CategoryRepository;

/// Input for [`CreateCategoryHandler`]
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Validates and persists a new category.
///
/// Parent existence is left to the repository; its error is returned as-is.
pub struct CreateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    name_policy: NameLengthPolicy,
}

impl CreateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, name_policy: NameLengthPolicy) -> Self {
        Self {
            repository,
            name_policy,
        }
    }

    pub async fn execute(&self, command: CreateCategoryCommand) -> Result<Category> {
        let name = CategoryName::with_policy(command.name, self.name_policy)?;
        let category = self
            .repository
            .save(Category::new(name, command.parent_id))
            .await?;

        tracing::info!(
            id = ?category.id(),
            parent_id = ?category.parent_id(),
            "Category created"
        );
        Ok(category)
    }
}
