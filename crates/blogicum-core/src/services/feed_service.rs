//! Feed service
//!
//! Resolves the scope of each feed, loads its candidates and hands them to the
//! [`FeedComposer`] together with the viewer's visibility rule.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Category, Comment, PostRecord, User, Viewer};
use crate::error::DomainError;
use crate::feed::{FeedComposer, FeedPage, FeedScope, Page, PageNumber, Visibility};
use crate::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

/// A category page.
#[derive(Debug, Clone)]
pub struct CategoryFeed {
    pub category: Category,
    pub page: FeedPage,
}

/// A profile page.
#[derive(Debug, Clone)]
pub struct ProfileFeed {
    pub user: User,
    pub page: FeedPage,
}

/// A single post with its comments, oldest first.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub record: PostRecord,
    pub comments: Vec<Comment>,
}

/// Service for the read side of the blog.
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
    composer: FeedComposer,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
        composer: FeedComposer,
    ) -> Self {
        Self {
            posts,
            categories,
            users,
            comments,
            composer,
        }
    }

    /// Every public post.
    pub async fn global_feed(
        &self,
        viewer: Viewer,
        page: PageNumber,
    ) -> Result<FeedPage, DomainError> {
        self.compose(FeedScope::Global, viewer, page).await
    }

    /// Public posts of a published category.
    pub async fn category_feed(
        &self,
        slug: &str,
        viewer: Viewer,
        page: PageNumber,
    ) -> Result<CategoryFeed, DomainError> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let page = self
            .compose(FeedScope::Category(category.id), viewer, page)
            .await?;

        Ok(CategoryFeed { category, page })
    }

    /// Posts by one user. The user themselves also sees drafts and scheduled
    /// posts.
    pub async fn profile_feed(
        &self,
        username: &str,
        viewer: Viewer,
        page: PageNumber,
    ) -> Result<ProfileFeed, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let page = self.compose(FeedScope::Author(user.id), viewer, page).await?;

        Ok(ProfileFeed { user, page })
    }

    /// One post. Hidden posts are reported as missing unless the viewer wrote
    /// them.
    pub async fn post_detail(&self, id: Uuid, viewer: Viewer) -> Result<PostDetail, DomainError> {
        let record = self.visible_post(id, viewer).await?;
        let comments = self.comments.find_by_post(id).await?;

        Ok(PostDetail { record, comments })
    }

    /// Load a post if `viewer` may open it.
    pub async fn visible_post(&self, id: Uuid, viewer: Viewer) -> Result<PostRecord, DomainError> {
        self.posts
            .find_record(id)
            .await?
            .filter(|record| Visibility::for_detail(viewer).permits(record, Utc::now()))
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    async fn compose(
        &self,
        scope: FeedScope,
        viewer: Viewer,
        page: PageNumber,
    ) -> Result<FeedPage, DomainError> {
        let candidates = self.posts.find_candidates(scope).await?;
        let visibility = Visibility::for_scope(scope, viewer);

        let page: Page<PostRecord> = self
            .composer
            .compose(candidates, visibility, page, Utc::now());
        let counts = if page.items.is_empty() {
            Default::default()
        } else {
            self.comments.count_by_posts(&page.post_ids()).await?
        };

        tracing::debug!(
            ?scope,
            ?visibility,
            page = page.meta.number,
            total_pages = page.meta.total_pages,
            "Feed composed"
        );

        Ok(page.annotate(&counts))
    }
}
