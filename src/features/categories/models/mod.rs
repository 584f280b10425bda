mod category;
mod category_name;

pub use category::{Category, CategoryRow};
pub use category_name::{CategoryName, NameLengthPolicy};
