use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::CategoryName;

/// Category entity: a named node in a single-parent hierarchy.
///
/// `id` is `None` until the category has been saved. `children` is only
/// filled in for tree views and is never written back to storage.
#[derive(Debug, Clone)]
pub struct Category {
    id: Option<i64>,
    name: CategoryName,
    parent_id: Option<i64>,
    children: Vec<Category>,
}

impl Category {
    /// A category that has not been persisted yet
    pub fn new(name: CategoryName, parent_id: Option<i64>) -> Self {
        Self {
            id: None,
            name,
            parent_id,
            children: Vec::new(),
        }
    }

    /// A category with a storage-assigned id
    pub fn with_id(id: i64, name: CategoryName, parent_id: Option<i64>) -> Self {
        Self {
            id: Some(id),
            name,
            parent_id,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    pub fn children(&self) -> &[Category] {
        &self.children
    }

    #[cfg(test)]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn renamed(mut self, name: CategoryName) -> Self {
        self.name = name;
        self
    }

    pub fn reparented(mut self, parent_id: Option<i64>) -> Self {
        self.parent_id = parent_id;
        self
    }

    #[cfg(test)]
    pub(crate) fn assign_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Same category with the given subtree attached
    pub(crate) fn with_children(mut self, children: Vec<Category>) -> Self {
        self.children = children;
        self
    }

    pub(crate) fn into_children(mut self) -> Vec<Category> {
        std::mem::take(&mut self.children)
    }

    /// Copy of this category without any attached subtree
    pub(crate) fn detached(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            parent_id: self.parent_id,
            children: Vec::new(),
        }
    }
}

// Subtrees can be arbitrarily deep; unlink them with an explicit stack
impl Drop for Category {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Identity is id, name and parent. Materialized children are ignored.
impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.parent_id == other.parent_id
    }
}

impl Eq for Category {}

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::with_id(
            row.id,
            CategoryName::from_persisted(row.name),
            row.parent_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> CategoryName {
        CategoryName::new(value).unwrap()
    }

    #[test]
    fn test_new_category_has_no_id() {
        let category = Category::new(name("Concerts"), Some(3));

        assert_eq!(category.id(), None);
        assert_eq!(category.name().value(), "Concerts");
        assert_eq!(category.parent_id(), Some(3));
        assert!(category.children().is_empty());
        assert!(!category.is_root());
    }

    #[test]
    fn test_functional_updates_keep_identity() {
        let original = Category::with_id(7, name("Theatre"), None);

        let updated = original.clone().renamed(name("Drama")).reparented(Some(2));

        assert_eq!(updated.id(), Some(7));
        assert_eq!(updated.name().value(), "Drama");
        assert_eq!(updated.parent_id(), Some(2));
        assert_eq!(original.name().value(), "Theatre");
    }

    #[test]
    fn test_equality_ignores_children() {
        let leaf = Category::with_id(2, name("Rock"), Some(1));
        let bare = Category::with_id(1, name("Music"), None);
        let with_subtree = bare.clone().with_children(vec![leaf]);

        assert_eq!(bare, with_subtree);
        assert_eq!(with_subtree.detached().children().len(), 0);
    }

    #[test]
    fn test_row_conversion() {
        let now = Utc::now();
        let row = CategoryRow {
            id: 4,
            name: "Festivals".to_string(),
            parent_id: Some(1),
            created_at: now,
            updated_at: now,
        };

        let category = Category::from(row);

        assert_eq!(category, Category::with_id(4, name("Festivals"), Some(1)));
    }

    #[test]
    fn test_deep_subtree_drops_on_small_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let mut chain = Category::with_id(0, name("Leaf"), None);
                for id in 1..20_000 {
                    chain = Category::with_id(id, name("Node"), None).with_children(vec![chain]);
                }
                drop(chain);
            })
            .unwrap();

        handle.join().unwrap();
    }
}
