//! Read-only views: the three feeds and the single-post page.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::feed::PageNumber;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{CategoryFeedResponse, PageQuery, PostDetailResponse, ProfileFeedResponse};

use super::views;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn requested_page(query: &PageQuery) -> PageNumber {
    PageNumber::parse(query.page.as_deref())
}

/// GET /api/posts
pub async fn index(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .feed
        .global_feed(identity.viewer(), requested_page(&query))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::feed(page))))
}

/// GET /api/category/{slug}
pub async fn category_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feed
        .category_feed(&path, identity.viewer(), requested_page(&query))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryFeedResponse {
        category: views::category(feed.category),
        feed: views::feed(feed.page),
    })))
}

/// GET /api/profile/{username}
pub async fn profile(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feed
        .profile_feed(&path, identity.viewer(), requested_page(&query))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileFeedResponse {
        profile: views::user(&feed.user),
        feed: views::feed(feed.page),
    })))
}

/// GET /api/posts/{post_id}
pub async fn post_detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state
        .feed
        .post_detail(path.into_inner(), identity.viewer())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail_response(detail))))
}

pub(super) fn detail_response(detail: blogicum_core::services::PostDetail) -> PostDetailResponse {
    let comment_count = detail.comments.len() as u64;
    PostDetailResponse {
        post: views::post(detail.record, comment_count),
        comments: detail.comments.into_iter().map(views::comment).collect(),
    }
}
