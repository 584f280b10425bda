use std::sync::Arc;

use axum_test::TestServer;

use crate::features::categories::models::NameLengthPolicy;
use crate::features::categories::repositories::InMemoryCategoryRepository;
use crate::features::categories::routes::routes as category_routes;
use crate::features::categories::CategoryUseCases;

/// Category routes backed by a fresh in-memory repository
pub fn category_test_server(name_policy: NameLengthPolicy) -> TestServer {
    let repository = Arc::new(InMemoryCategoryRepository::new());
    let use_cases = Arc::new(CategoryUseCases::new(repository, name_policy));
    TestServer::new(category_routes(use_cases)).expect("failed to start test server")
}
