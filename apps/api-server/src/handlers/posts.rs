//! Post authoring. Only the author may edit or delete; anyone else is sent
//! back to a page they can see.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::DomainError;
use blogicum_core::services::PostInput;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::PostRequest;

use super::feed::detail_response;
use super::{post_url, profile_url, redirect_to, views};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_input(req: PostRequest) -> PostInput {
    PostInput {
        title: req.title,
        text: req.text,
        pub_date: req.pub_date,
        is_published: req.is_published,
        category_slug: req.category,
        location: req.location,
    }
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let record = state
        .posts
        .create(identity.user_id, post_input(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(views::post(record, 0))))
}

/// PUT /api/posts/{post_id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    match state
        .posts
        .update(post_id, identity.user_id, post_input(body.into_inner()))
        .await
    {
        Ok(_) => {}
        Err(DomainError::NotOwner(_)) => return Ok(redirect_to(post_url(post_id))),
        Err(e) => return Err(e.into()),
    }

    let detail = state.feed.post_detail(post_id, identity.viewer()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail_response(detail))))
}

/// DELETE /api/posts/{post_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    match state.posts.delete(path.into_inner(), identity.user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::done("Post deleted"))),
        Err(DomainError::NotOwner(_)) => Ok(redirect_to(profile_url(&identity.username))),
        Err(e) => Err(e.into()),
    }
}
