use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryName, NameLengthPolicy};
use crate::features::categories::repositories::CategoryRepository;

/// Input for [`UpdateCategoryHandler`]. `None` fields are left unchanged;
/// `parent_id: Some(None)` moves the category to the root level.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: Option<String>,
    pub parent_id: Option<Option<i64>>,
}

pub struct UpdateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    name_policy: NameLengthPolicy,
}

impl UpdateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, name_policy: NameLengthPolicy) -> Self {
        Self {
            repository,
            name_policy,
        }
    }

    pub async fn execute(&self, command: UpdateCategoryCommand) -> Result<Category> {
        let id = command.id;
        let mut category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        if let Some(name) = command.name {
            category = category.renamed(CategoryName::with_policy(name, self.name_policy)?);
        }

        if let Some(parent_id) = command.parent_id {
            if let Some(parent_id) = parent_id {
                self.ensure_no_cycle(id, parent_id).await?;
            }
            category = category.reparented(parent_id);
        }

        let category = self.repository.save(category).await?;
        tracing::info!(id, parent_id = ?category.parent_id(), "Category updated");
        Ok(category)
    }

    /// The new parent may be neither the category itself nor one of its descendants
    async fn ensure_no_cycle(&self, id: i64, parent_id: i64) -> Result<()> {
        if parent_id == id {
            return Err(AppError::Validation(
                "A category cannot be its own parent".to_string(),
            ));
        }

        let descendants = self.repository.find_all_descendant_ids(&[id]).await?;
        if descendants.contains(&parent_id) {
            return Err(AppError::Validation(format!(
                "Category {} is a descendant of category {} and cannot become its parent",
                parent_id, id
            )));
        }

        Ok(())
    }
}
