use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::use_cases::CategoryUseCases;

/// Create routes for the categories feature
pub fn routes(use_cases: Arc<CategoryUseCases>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/api/categories/tree", get(handlers::get_category_tree))
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/api/categories/{id}/children",
            get(handlers::list_category_children),
        )
        .route(
            "/api/categories/{id}/descendants",
            get(handlers::list_category_descendants),
        )
        .with_state(use_cases)
}
