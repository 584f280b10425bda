use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::repositories::{CategoryRepository, PaginatedCategories};
use crate::shared::types::PaginationQuery;

pub struct GetAllCategoriesHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl GetAllCategoriesHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, pagination: PaginationQuery) -> Result<PaginatedCategories> {
        self.repository.find_all(&pagination).await
    }
}
