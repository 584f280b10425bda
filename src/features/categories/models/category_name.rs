use std::fmt;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{CATEGORY_NAME_MAX_LENGTH, CATEGORY_NAME_MIN_LENGTH};

/// How strictly [`CategoryName`] checks length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameLengthPolicy {
    /// 1 to 30 characters
    #[default]
    Enforced,
    /// Only rejects empty names
    Unbounded,
}

impl NameLengthPolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            Self::Enforced
        } else {
            Self::Unbounded
        }
    }
}

/// Display name of a category.
///
/// The value is stored as given. Trimming is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Builds a name under the default (enforced) length policy
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_policy(name, NameLengthPolicy::Enforced)
    }

    pub fn with_policy(name: impl Into<String>, policy: NameLengthPolicy) -> Result<Self> {
        let name = name.into();
        let length = name.chars().count();

        if length < CATEGORY_NAME_MIN_LENGTH {
            return Err(AppError::Validation(
                "Category name must not be empty".to_string(),
            ));
        }

        if policy == NameLengthPolicy::Enforced && length > CATEGORY_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "Category name must be between {} and {} characters",
                CATEGORY_NAME_MIN_LENGTH, CATEGORY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Wraps a name read back from storage, where it was validated on write
    pub(crate) fn from_persisted(name: String) -> Self {
        Self(name)
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(CategoryName::new("Music").unwrap().value(), "Music");
        assert_eq!(CategoryName::new("a").unwrap().value(), "a");
        assert!(CategoryName::new("x".repeat(CATEGORY_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_name_is_not_trimmed() {
        let name = CategoryName::new("  Jazz ").unwrap();
        assert_eq!(name.value(), "  Jazz ");
    }

    #[test]
    fn test_empty_name_rejected_under_any_policy() {
        assert!(matches!(
            CategoryName::new(""),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            CategoryName::with_policy("", NameLengthPolicy::Unbounded),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_overlong_name() {
        let long = "x".repeat(CATEGORY_NAME_MAX_LENGTH + 1);

        assert!(matches!(
            CategoryName::new(long.clone()),
            Err(AppError::Validation(_))
        ));
        assert!(CategoryName::with_policy(long, NameLengthPolicy::Unbounded).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 30 multi-byte characters
        let name = "é".repeat(CATEGORY_NAME_MAX_LENGTH);
        assert!(CategoryName::new(name).is_ok());
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(
            CategoryName::new("Sports").unwrap(),
            CategoryName::new("Sports").unwrap()
        );
        assert_ne!(
            CategoryName::new("Sports").unwrap(),
            CategoryName::new("sports").unwrap()
        );
    }
}
