use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::repositories::CategoryRepository;

/// Expands a category filter into every sub-category id.
///
/// Used by event search so that filtering on a parent category also
/// matches events tagged with any of its descendants.
pub struct GetCategoryDescendantsHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl GetCategoryDescendantsHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Returns ids sorted ascending. With `include_self` the starting ids are
    /// part of the result as well.
    pub async fn execute(&self, category_ids: &[i64], include_self: bool) -> Result<Vec<i64>> {
        let mut ids = self
            .repository
            .find_all_descendant_ids(category_ids)
            .await?;

        if include_self {
            ids.extend(category_ids.iter().copied());
        }

        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
