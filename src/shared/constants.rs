/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// CATEGORY CONSTANTS
// =============================================================================

/// Minimum category name length, in characters
pub const CATEGORY_NAME_MIN_LENGTH: usize = 1;

/// Maximum category name length, in characters
pub const CATEGORY_NAME_MAX_LENGTH: usize = 30;

/// Deepest category tree the API will render, in levels
pub const MAX_CATEGORY_TREE_DEPTH: usize = 100;
