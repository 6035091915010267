//! Post authoring - create, edit and delete, each gated on authorship.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{MAX_SHORT_TEXT_LEN, Post, PostRecord};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository};

use super::require_text;

/// Editable fields of a post.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub text: String,
    /// Defaults to "now" on create and to the current value on edit.
    pub pub_date: Option<DateTime<Utc>>,
    /// Defaults to published on create and to the current value on edit.
    pub is_published: Option<bool>,
    pub category_slug: Option<String>,
    pub location: Option<String>,
}

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { posts, categories }
    }

    pub async fn create(&self, author_id: Uuid, input: PostInput) -> Result<PostRecord, DomainError> {
        let category_id = self.validate(&input).await?;

        let mut post = Post::new(
            author_id,
            input.title,
            input.text,
            input.pub_date.unwrap_or_else(Utc::now),
        );
        post.is_published = input.is_published.unwrap_or(true);
        post.category_id = category_id;
        post.location = input.location.filter(|l| !l.trim().is_empty());

        let post = self.posts.create(post).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");

        self.load_record(post.id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor: Uuid,
        input: PostInput,
    ) -> Result<PostRecord, DomainError> {
        let mut post = self.owned_post(id, actor).await?;
        let category_id = self.validate(&input).await?;

        post.title = input.title;
        post.text = input.text;
        post.pub_date = input.pub_date.unwrap_or(post.pub_date);
        post.is_published = input.is_published.unwrap_or(post.is_published);
        post.category_id = category_id;
        post.location = input.location.filter(|l| !l.trim().is_empty());

        self.posts.update(post).await?;
        tracing::info!(post_id = %id, "Post updated");

        self.load_record(id).await
    }

    pub async fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), DomainError> {
        self.owned_post(id, actor).await?;
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn owned_post(&self, id: Uuid, actor: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;

        if post.author_id != actor {
            tracing::warn!(post_id = %id, user_id = %actor, "Rejected edit by non-author");
            return Err(DomainError::NotOwner("post"));
        }
        Ok(post)
    }

    /// Check field constraints and resolve the category slug.
    async fn validate(&self, input: &PostInput) -> Result<Option<Uuid>, DomainError> {
        require_text("title", &input.title, Some(MAX_SHORT_TEXT_LEN))?;
        require_text("text", &input.text, None)?;
        if let Some(location) = &input.location
            && location.chars().count() > MAX_SHORT_TEXT_LEN
        {
            return Err(DomainError::Validation(format!(
                "location must be at most {MAX_SHORT_TEXT_LEN} characters"
            )));
        }

        match input.category_slug.as_deref().filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(slug) => self
                .categories
                .find_by_slug(slug)
                .await?
                .map(|c| Some(c.id))
                .ok_or_else(|| DomainError::Validation(format!("unknown category '{slug}'"))),
        }
    }

    async fn load_record(&self, id: Uuid) -> Result<PostRecord, DomainError> {
        self.posts
            .find_record(id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("post {id} vanished after write")))
    }
}
