//! Category use-cases. Each handler receives its repository explicitly.

mod create_category;
mod delete_category;
mod descendants;
mod get_all_categories;
mod get_category_by_id;
mod get_category_children;
mod get_category_descendants;
mod get_category_tree;
mod tree;
mod update_category;

use std::sync::Arc;

pub use create_category::{CreateCategoryCommand, CreateCategoryHandler};
pub use delete_category::DeleteCategoryHandler;
pub use descendants::resolve_descendant_ids;
pub use get_all_categories::GetAllCategoriesHandler;
pub use get_category_by_id::GetCategoryByIdHandler;
pub use get_category_children::GetCategoryChildrenHandler;
pub use get_category_descendants::GetCategoryDescendantsHandler;
pub use get_category_tree::GetCategoryTreeHandler;
pub use tree::{build_category_tree, category_tree_depth};
pub use update_category::{UpdateCategoryCommand, UpdateCategoryHandler};

use crate::features::categories::models::NameLengthPolicy;
use crate::features::categories::repositories::CategoryRepository;

/// All category use-cases wired to one repository, shared as router state
pub struct CategoryUseCases {
    pub create: CreateCategoryHandler,
    pub get_by_id: GetCategoryByIdHandler,
    pub get_all: GetAllCategoriesHandler,
    pub get_tree: GetCategoryTreeHandler,
    pub get_children: GetCategoryChildrenHandler,
    pub get_descendants: GetCategoryDescendantsHandler,
    pub update: UpdateCategoryHandler,
    pub delete: DeleteCategoryHandler,
}

impl CategoryUseCases {
    pub fn new(repository: Arc<dyn CategoryRepository>, name_policy: NameLengthPolicy) -> Self {
        Self {
            create: CreateCategoryHandler::new(Arc::clone(&repository), name_policy),
            get_by_id: GetCategoryByIdHandler::new(Arc::clone(&repository)),
            get_all: GetAllCategoriesHandler::new(Arc::clone(&repository)),
            get_tree: GetCategoryTreeHandler::new(Arc::clone(&repository)),
            get_children: GetCategoryChildrenHandler::new(Arc::clone(&repository)),
            get_descendants: GetCategoryDescendantsHandler::new(Arc::clone(&repository)),
            update: UpdateCategoryHandler::new(Arc::clone(&repository), name_policy),
            delete: DeleteCategoryHandler::new(repository),
        }
    }
}
