use std::collections::HashSet;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::shared::types::PaginationQuery;

/// One page of categories plus the totals needed to navigate the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedCategories {
    pub categories: Vec<Category>,
    pub total_items: i64,
    pub current_page: i64,
    pub items_per_page: i64,
    pub total_pages: i64,
}

impl PaginatedCategories {
    pub fn new(categories: Vec<Category>, total_items: i64, pagination: &PaginationQuery) -> Self {
        Self {
            categories,
            total_items,
            current_page: pagination.page(),
            items_per_page: pagination.limit(),
            total_pages: pagination.total_pages(total_items),
        }
    }
}

/// Storage port for the category hierarchy.
///
/// Implementations own uniqueness of names and existence of referenced
/// parents. Their failures surface unchanged through the use-cases.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Page through all categories ordered by id (1-indexed pages)
    async fn find_all(&self, pagination: &PaginationQuery) -> Result<PaginatedCategories>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>>;

    /// Direct children of `parent_id`, or the root categories for `None`
    async fn find_by_parent_id(&self, parent_id: Option<i64>) -> Result<Vec<Category>>;

    async fn find_by_parent_name(&self, parent_name: &str) -> Result<Vec<Category>>;

    /// Insert when the category has no id, update otherwise.
    /// Returns the stored entity with its id assigned.
    async fn save(&self, category: Category) -> Result<Category>;

    /// `true` iff a category was removed
    async fn delete_by_id(&self, id: i64) -> Result<bool>;

    /// Every category, unpaginated
    async fn fetch_all(&self) -> Result<Vec<Category>>;

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>>;

    /// Transitive descendants of `category_ids`, see
    /// [`resolve_descendant_ids`](crate::features::categories::use_cases::resolve_descendant_ids)
    async fn find_all_descendant_ids(&self, category_ids: &[i64]) -> Result<HashSet<i64>>;
}
