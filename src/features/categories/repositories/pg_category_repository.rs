use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryRow};
use crate::features::categories::repositories::{CategoryRepository, PaginatedCategories};
use crate::features::categories::use_cases::resolve_descendant_ids;
use crate::shared::types::PaginationQuery;

const CATEGORY_COLUMNS: &str = "id, name, parent_id, created_at, updated_at";

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation
        if db_err.code().as_deref() == Some("23505") {
            return AppError::Conflict("A category with this name already exists.".to_string());
        }

        // Foreign key violation
        if db_err.code().as_deref() == Some("23503") {
            return AppError::BadRequest("Parent category does not exist.".to_string());
        }

        // Check constraint violation (self-parenting)
        if db_err.code().as_deref() == Some("23514") {
            return AppError::Validation("A category cannot be its own parent.".to_string());
        }
    }

    tracing::error!("Category query failed: {:?}", e);
    AppError::Database(e)
}

/// Postgres-backed [`CategoryRepository`]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, category: &Category) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (name, parent_id)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let row: CategoryRow = sqlx::query_as(&query)
            .bind(category.name().value())
            .bind(category.parent_id())
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, category: &Category) -> Result<Category> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1,
                parent_id = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let row: CategoryRow = sqlx::query_as(&query)
            .bind(category.name().value())
            .bind(category.parent_id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        Ok(row.into())
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self, pagination: &PaginationQuery) -> Result<PaginatedCategories> {
        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        let query = format!(
            r#"
            SELECT {}
            FROM categories
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
            CATEGORY_COLUMNS
        );

        let rows: Vec<CategoryRow> = sqlx::query_as(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(PaginatedCategories::new(
            rows.into_iter().map(Category::from).collect(),
            total_items,
            pagination,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        let row: Option<CategoryRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(row.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE name = $1",
            CATEGORY_COLUMNS
        );

        let row: Option<CategoryRow> = sqlx::query_as(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(row.map(Category::from))
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM categories WHERE name = ANY($1) ORDER BY id",
            CATEGORY_COLUMNS
        );

        let rows: Vec<CategoryRow> = sqlx::query_as(&query)
            .bind(names)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_parent_id(&self, parent_id: Option<i64>) -> Result<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE parent_id IS NOT DISTINCT FROM $1 ORDER BY id",
            CATEGORY_COLUMNS
        );

        let rows: Vec<CategoryRow> = sqlx::query_as(&query)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_parent_name(&self, parent_name: &str) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.parent_id, c.created_at, c.updated_at
            FROM categories c
            JOIN categories p ON c.parent_id = p.id
            WHERE p.name = $1
            ORDER BY c.id
            "#,
        )
        .bind(parent_name)
        .fetch_all(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn save(&self, category: Category) -> Result<Category> {
        let saved = match category.id() {
            None => self.insert(&category).await?,
            Some(id) => self.update(id, &category).await?,
        };

        tracing::debug!(id = ?saved.id(), "Category saved");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch_all(&self) -> Result<Vec<Category>> {
        let query = format!("SELECT {} FROM categories ORDER BY id", CATEGORY_COLUMNS);

        let rows: Vec<CategoryRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM categories WHERE id = ANY($1) ORDER BY id",
            CATEGORY_COLUMNS
        );

        let rows: Vec<CategoryRow> = sqlx::query_as(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_all_descendant_ids(&self, category_ids: &[i64]) -> Result<HashSet<i64>> {
        if category_ids.is_empty() {
            return Ok(HashSet::new());
        }

        // One round trip for the whole edge list, traversal happens in memory
        let links: Vec<(i64, Option<i64>)> =
            sqlx::query_as("SELECT id, parent_id FROM categories")
                .fetch_all(&self.pool)
                .await
                .map_err(handle_db_error)?;

        Ok(resolve_descendant_ids(links, category_ids))
    }
}
