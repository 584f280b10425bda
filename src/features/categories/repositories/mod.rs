mod category_repository;
#[cfg(test)]
mod in_memory_category_repository;
mod pg_category_repository;

pub use category_repository::{CategoryRepository, PaginatedCategories};
#[cfg(test)]
pub use in_memory_category_repository::InMemoryCategoryRepository;
pub use pg_category_repository::PgCategoryRepository;
