use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, DescendantsQuery, UpdateCategoryDto,
};
use crate::features::categories::use_cases::CategoryUseCases;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or unknown parent"),
        (status = 409, description = "Category name already taken")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(use_cases): State<Arc<CategoryUseCases>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = use_cases.create.execute(dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category.into()), None, None)),
    ))
}

/// List categories (paginated, flat)
#[utoipa::path(
    get,
    path = "/api/categories",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(use_cases): State<Arc<CategoryUseCases>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let page = use_cases.get_all.execute(pagination).await?;
    let meta = Meta::paginated(
        page.total_items,
        page.current_page,
        page.items_per_page,
        page.total_pages,
    );
    let categories = page.categories.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

/// Full category hierarchy
#[utoipa::path(
    get,
    path = "/api/categories/tree",
    responses(
        (status = 200, description = "Category forest", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 400, description = "Hierarchy too deep to render")
    ),
    tag = "categories"
)]
pub async fn get_category_tree(
    State(use_cases): State<Arc<CategoryUseCases>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let forest = use_cases.get_tree.execute().await?;
    Ok(Json(ApiResponse::success(
        Some(CategoryTreeDto::from_forest(forest)),
        None,
        None,
    )))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(use_cases): State<Arc<CategoryUseCases>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = use_cases.get_by_id.execute(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Rename or move a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error, unknown parent or cycle"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already taken")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(use_cases): State<Arc<CategoryUseCases>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = use_cases.update.execute(dto.into_command(id)).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Delete a category; its children become root categories
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(use_cases): State<Arc<CategoryUseCases>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    use_cases.delete.execute(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Direct children of a category
#[utoipa::path(
    get,
    path = "/api/categories/{id}/children",
    params(
        ("id" = i64, Path, description = "Parent category id")
    ),
    responses(
        (status = 200, description = "Child categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn list_category_children(
    State(use_cases): State<Arc<CategoryUseCases>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let children: Vec<CategoryResponseDto> = use_cases
        .get_children
        .execute(Some(id))
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let meta = Meta::total(children.len() as i64);

    Ok(Json(ApiResponse::success(Some(children), None, Some(meta))))
}

/// Ids of every descendant of a category
#[utoipa::path(
    get,
    path = "/api/categories/{id}/descendants",
    params(
        ("id" = i64, Path, description = "Category id"),
        DescendantsQuery
    ),
    responses(
        (status = 200, description = "Descendant ids, ascending", body = ApiResponse<Vec<i64>>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn list_category_descendants(
    State(use_cases): State<Arc<CategoryUseCases>>,
    AppPath(id): AppPath<i64>,
    Query(query): Query<DescendantsQuery>,
) -> Result<Json<ApiResponse<Vec<i64>>>> {
    // 404 for unknown ids instead of an empty set
    use_cases.get_by_id.execute(id).await?;

    let ids = use_cases
        .get_descendants
        .execute(&[id], query.include_self)
        .await?;
    let meta = Meta::total(ids.len() as i64);

    Ok(Json(ApiResponse::success(Some(ids), None, Some(meta))))
}
