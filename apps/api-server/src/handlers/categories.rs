//! Category administration.

use actix_web::{HttpResponse, web};

use blogicum_core::services::{CategoryInput, CategoryUpdate};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{CreateCategoryRequest, UpdateCategoryRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/admin/categories
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let category = state
        .categories
        .create(
            identity.user_id,
            CategoryInput {
                title: req.title,
                description: req.description,
                slug: req.slug,
                is_published: req.is_published,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(views::category(category))))
}

/// PUT /api/admin/categories/{slug}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let category = state
        .categories
        .update(
            &path,
            identity.user_id,
            CategoryUpdate {
                title: req.title,
                description: req.description,
                is_published: req.is_published,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::category(category))))
}
