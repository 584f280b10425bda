use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::{CategoryRepository, PaginatedCategories};
use crate::features::categories::use_cases::resolve_descendant_ids;
use crate::shared::types::PaginationQuery;

#[derive(Default)]
struct Store {
    rows: BTreeMap<i64, Category>,
    next_id: i64,
}

/// In-memory [`CategoryRepository`] mirroring the Postgres constraints:
/// unique names, existing parents, no self-parenting, and children
/// detached when their parent is deleted.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    store: RwLock<Store>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts rows as-is, bypassing every constraint
    pub async fn seed(&self, categories: Vec<Category>) {
        let mut store = self.store.write().await;
        for category in categories {
            if let Some(id) = category.id() {
                store.next_id = store.next_id.max(id);
                store.rows.insert(id, category);
            }
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self, pagination: &PaginationQuery) -> Result<PaginatedCategories> {
        let store = self.store.read().await;
        let categories = store
            .rows
            .values()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();

        Ok(PaginatedCategories::new(
            categories,
            store.rows.len() as i64,
            pagination,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .find(|c| c.name().value() == name)
            .cloned())
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|c| names.iter().any(|n| n == c.name().value()))
            .cloned()
            .collect())
    }

    async fn find_by_parent_id(&self, parent_id: Option<i64>) -> Result<Vec<Category>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|c| c.parent_id() == parent_id)
            .cloned()
            .collect())
    }

    async fn find_by_parent_name(&self, parent_name: &str) -> Result<Vec<Category>> {
        let store = self.store.read().await;
        let parent_ids: HashSet<i64> = store
            .rows
            .iter()
            .filter(|(_, c)| c.name().value() == parent_name)
            .map(|(id, _)| *id)
            .collect();

        Ok(store
            .rows
            .values()
            .filter(|c| c.parent_id().is_some_and(|p| parent_ids.contains(&p)))
            .cloned()
            .collect())
    }

    async fn save(&self, category: Category) -> Result<Category> {
        let mut store = self.store.write().await;

        if let Some(parent_id) = category.parent_id() {
            if category.id() == Some(parent_id) {
                return Err(AppError::Validation(
                    "A category cannot be its own parent.".to_string(),
                ));
            }
            if !store.rows.contains_key(&parent_id) {
                return Err(AppError::BadRequest(
                    "Parent category does not exist.".to_string(),
                ));
            }
        }

        let duplicate = store
            .rows
            .values()
            .any(|c| c.name() == category.name() && c.id() != category.id());
        if duplicate {
            return Err(AppError::Conflict(
                "A category with this name already exists.".to_string(),
            ));
        }

        let id = match category.id() {
            Some(id) if store.rows.contains_key(&id) => id,
            Some(id) => {
                return Err(AppError::NotFound(format!(
                    "Category with id {} not found",
                    id
                )))
            }
            None => {
                store.next_id += 1;
                store.next_id
            }
        };

        let saved = category.detached().assign_id(id);
        store.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut store = self.store.write().await;
        if store.rows.remove(&id).is_none() {
            return Ok(false);
        }

        for category in store.rows.values_mut() {
            if category.parent_id() == Some(id) {
                *category = category.clone().reparented(None);
            }
        }
        Ok(true)
    }

    async fn fetch_all(&self) -> Result<Vec<Category>> {
        Ok(self.store.read().await.rows.values().cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|c| c.id().is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn find_all_descendant_ids(&self, category_ids: &[i64]) -> Result<HashSet<i64>> {
        let store = self.store.read().await;
        let links = store
            .rows
            .values()
            .filter_map(|c| c.id().map(|id| (id, c.parent_id())));

        Ok(resolve_descendant_ids(links, category_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::CategoryName;

    fn new_category(name: &str, parent_id: Option<i64>) -> Category {
        Category::new(CategoryName::new(name).unwrap(), parent_id)
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryCategoryRepository::new();

        let music = repo.save(new_category("Music", None)).await.unwrap();
        let rock = repo.save(new_category("Rock", music.id())).await.unwrap();

        assert_eq!(music.id(), Some(1));
        assert_eq!(rock.id(), Some(2));
        assert_eq!(rock.parent_id(), Some(1));
    }

    #[tokio::test]
    async fn test_save_rejects_unknown_parent_and_duplicate_name() {
        let repo = InMemoryCategoryRepository::new();
        repo.save(new_category("Music", None)).await.unwrap();

        assert!(matches!(
            repo.save(new_category("Rock", Some(42))).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            repo.save(new_category("Music", None)).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_detaches_children() {
        let repo = InMemoryCategoryRepository::new();
        let music = repo.save(new_category("Music", None)).await.unwrap();
        let rock = repo.save(new_category("Rock", music.id())).await.unwrap();

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());

        let rock = repo.find_by_id(rock.id().unwrap()).await.unwrap().unwrap();
        assert!(rock.is_root());
    }

    #[tokio::test]
    async fn test_parent_queries() {
        let repo = InMemoryCategoryRepository::new();
        let music = repo.save(new_category("Music", None)).await.unwrap();
        repo.save(new_category("Rock", music.id())).await.unwrap();
        repo.save(new_category("Jazz", music.id())).await.unwrap();
        repo.save(new_category("Sports", None)).await.unwrap();

        let roots = repo.find_by_parent_id(None).await.unwrap();
        let by_name = repo.find_by_parent_name("Music").await.unwrap();

        assert_eq!(roots.len(), 2);
        assert_eq!(by_name.len(), 2);
        assert_eq!(repo.find_by_parent_id(music.id()).await.unwrap(), by_name);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let repo = InMemoryCategoryRepository::new();
        let music = repo.save(new_category("Music", None)).await.unwrap();

        assert_eq!(repo.find_by_name("Music").await.unwrap(), Some(music));
        assert_eq!(repo.find_by_name("music").await.unwrap(), None);
        assert_eq!(repo.find_by_name("Theatre").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bulk_lookups_skip_unknown_values() {
        let repo = InMemoryCategoryRepository::new();
        let music = repo.save(new_category("Music", None)).await.unwrap();
        repo.save(new_category("Sports", None)).await.unwrap();
        let jazz = repo.save(new_category("Jazz", music.id())).await.unwrap();

        let by_names = repo
            .find_by_names(&["Jazz".to_string(), "Opera".to_string(), "Music".to_string()])
            .await
            .unwrap();
        let by_ids = repo
            .find_by_ids(&[jazz.id().unwrap(), 404, music.id().unwrap()])
            .await
            .unwrap();

        assert_eq!(by_names, vec![music.clone(), jazz.clone()]);
        assert_eq!(by_ids, vec![music, jazz]);
    }

    #[tokio::test]
    async fn test_bulk_lookups_with_empty_input() {
        let repo = InMemoryCategoryRepository::new();
        repo.save(new_category("Music", None)).await.unwrap();

        assert!(repo.find_by_names(&[]).await.unwrap().is_empty());
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
        assert!(repo.find_all_descendant_ids(&[]).await.unwrap().is_empty());
    }
}
