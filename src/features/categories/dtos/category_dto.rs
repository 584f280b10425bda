use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::features::categories::use_cases::{CreateCategoryCommand, UpdateCategoryCommand};

fn trim<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn trim_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Display name, trimmed before validation. The upper length bound
    /// depends on the configured name policy.
    #[serde(deserialize_with = "trim")]
    #[validate(length(min = 1))]
    pub name: String,

    /// Parent category id, absent or null for a root category
    #[serde(default)]
    #[validate(range(min = 1))]
    pub parent_id: Option<i64>,
}

impl From<CreateCategoryDto> for CreateCategoryCommand {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            parent_id: dto.parent_id,
        }
    }
}

// Update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[serde(default, deserialize_with = "trim_optional")]
    #[validate(length(min = 1))]
    pub name: Option<String>,

    /// New parent id. `null` moves the category to the root level,
    /// omitting the field keeps the current parent.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub parent_id: Option<Option<i64>>,
}

impl UpdateCategoryDto {
    pub fn into_command(self, id: i64) -> UpdateCategoryCommand {
        UpdateCategoryCommand {
            id,
            name: self.name,
            parent_id: self.parent_id,
        }
    }
}

/// Query params for the descendants endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DescendantsQuery {
    /// Include the requested category itself (default: false)
    #[serde(default)]
    pub include_self: bool,
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            // Categories handed to the HTTP layer come from storage
            id: c.id().unwrap_or_default(),
            parent_id: c.parent_id(),
            name: c.name().value().to_string(),
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Map an assembled forest without recursing per level
    pub fn from_forest(forest: Vec<Category>) -> Vec<CategoryTreeDto> {
        // Flatten in pre-order, remembering each node's parent slot
        let mut flat: Vec<(Option<usize>, CategoryTreeDto)> = Vec::new();
        let mut stack: Vec<(Option<usize>, Category)> =
            forest.into_iter().rev().map(|c| (None, c)).collect();

        while let Some((parent_slot, category)) = stack.pop() {
            let slot = flat.len();
            let dto = CategoryTreeDto {
                id: category.id().unwrap_or_default(),
                name: category.name().value().to_string(),
                parent_id: category.parent_id(),
                children: Vec::new(),
            };
            flat.push((parent_slot, dto));
            stack.extend(
                category
                    .into_children()
                    .into_iter()
                    .rev()
                    .map(|child| (Some(slot), child)),
            );
        }

        // Children always sit after their parent, so fold back to front
        let mut roots = Vec::new();
        while let Some((parent_slot, mut dto)) = flat.pop() {
            dto.children.reverse();
            match parent_slot {
                Some(parent) => flat[parent].1.children.push(dto),
                None => roots.push(dto),
            }
        }
        roots.reverse();
        roots
    }
}

impl Drop for CategoryTreeDto {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::CategoryName;
    use crate::features::categories::use_cases::build_category_tree;
    use crate::shared::constants::MAX_CATEGORY_TREE_DEPTH;
    use crate::shared::types::ApiResponse;

    fn category(id: i64, parent_id: Option<i64>) -> Category {
        Category::with_id(
            id,
            CategoryName::new(format!("Category {}", id)).unwrap(),
            parent_id,
        )
    }

    #[test]
    fn test_create_dto_trims_name() {
        let dto: CreateCategoryDto =
            serde_json::from_str(r#"{"name": "  Music  "}"#).unwrap();

        assert_eq!(dto.name, "Music");
        assert_eq!(dto.parent_id, None);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_validation() {
        let blank: CreateCategoryDto = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        let bad_parent: CreateCategoryDto =
            serde_json::from_str(r#"{"name": "Music", "parent_id": 0}"#).unwrap();

        assert!(blank.validate().is_err());
        assert!(bad_parent.validate().is_err());
    }

    #[test]
    fn test_long_names_left_to_name_policy() {
        let long = "x".repeat(40);
        let create: CreateCategoryDto =
            serde_json::from_str(&format!(r#"{{"name": "{}"}}"#, long)).unwrap();
        let update: UpdateCategoryDto =
            serde_json::from_str(&format!(r#"{{"name": "{}"}}"#, long)).unwrap();

        assert!(create.validate().is_ok());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_dto_parent_presence() {
        let absent: UpdateCategoryDto = serde_json::from_str(r#"{"name": "Jazz"}"#).unwrap();
        let null: UpdateCategoryDto = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        let set: UpdateCategoryDto = serde_json::from_str(r#"{"parent_id": 3}"#).unwrap();

        assert_eq!(absent.parent_id, None);
        assert_eq!(null.parent_id, Some(None));
        assert_eq!(set.parent_id, Some(Some(3)));
    }

    #[test]
    fn test_tree_dto_preserves_shape_and_order() {
        let forest = build_category_tree(vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(1)),
            category(4, Some(2)),
            category(5, None),
        ]);

        let dtos = CategoryTreeDto::from_forest(forest);

        assert_eq!(dtos.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(
            dtos[0].children.iter().map(|d| d.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert_eq!(dtos[0].children[0].children[0].id, 4);
        assert!(dtos[1].children.is_empty());
    }

    fn chain(depth: i64) -> Vec<Category> {
        (1..=depth)
            .map(|id| category(id, if id == 1 { None } else { Some(id - 1) }))
            .collect()
    }

    fn on_small_stack<F: FnOnce() + Send + 'static>(f: F) {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn test_deep_tree_dto_maps_and_drops_on_small_stack() {
        on_small_stack(|| {
            let dtos = CategoryTreeDto::from_forest(build_category_tree(chain(10_000)));

            let mut node = &dtos[0];
            let mut depth = 1;
            while let Some(child) = node.children.first() {
                node = child;
                depth += 1;
            }
            assert_eq!(depth, 10_000);
            assert_eq!(node.id, 10_000);
            drop(dtos);
        });
    }

    #[test]
    fn test_tree_at_depth_limit_serializes_on_small_stack() {
        on_small_stack(|| {
            let forest = build_category_tree(chain(MAX_CATEGORY_TREE_DEPTH as i64));
            let response =
                ApiResponse::success(Some(CategoryTreeDto::from_forest(forest)), None, None);

            let body = serde_json::to_vec(&response).unwrap();

            assert!(!body.is_empty());
        });
    }
}
