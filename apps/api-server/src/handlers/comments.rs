//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::DomainError;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::CommentRequest;

use super::{post_url, redirect_to, views};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .add(path.into_inner(), identity.user_id, body.into_inner().text)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(views::comment(comment))))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    match state
        .comments
        .edit(post_id, comment_id, identity.user_id, body.into_inner().text)
        .await
    {
        Ok(comment) => Ok(HttpResponse::Ok().json(ApiResponse::ok(views::comment(comment)))),
        Err(DomainError::NotOwner(_)) => Ok(redirect_to(post_url(post_id))),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    match state
        .comments
        .delete(post_id, comment_id, identity.user_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::done("Comment deleted"))),
        Err(DomainError::NotOwner(_)) => Ok(redirect_to(post_url(post_id))),
        Err(e) => Err(e.into()),
    }
}
