//! Category hierarchy used to classify events.
//!
//! Each category has at most one parent. Use-cases build the full tree and
//! expand a category into all of its descendants for hierarchical event
//! filtering.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/categories` | Create category |
//! | GET | `/api/categories` | Paginated flat list |
//! | GET | `/api/categories/tree` | Nested hierarchy |
//! | GET | `/api/categories/{id}` | Category by id |
//! | PUT | `/api/categories/{id}` | Rename or move |
//! | DELETE | `/api/categories/{id}` | Delete, children become roots |
//! | GET | `/api/categories/{id}/children` | Direct children |
//! | GET | `/api/categories/{id}/descendants` | Transitive descendant ids |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod use_cases;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use use_cases::CategoryUseCases;
