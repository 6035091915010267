//! Comment authoring.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Comment, Viewer};
use crate::error::DomainError;
use crate::feed::Visibility;
use crate::ports::{CommentRepository, PostRepository};

use super::require_text;

pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Comment on a post the author can currently open.
    pub async fn add(&self, post_id: Uuid, author_id: Uuid, text: String) -> Result<Comment, DomainError> {
        let visible = self
            .posts
            .find_record(post_id)
            .await?
            .is_some_and(|record| {
                Visibility::for_detail(Viewer::Authenticated(author_id)).permits(&record, Utc::now())
            });
        if !visible {
            return Err(DomainError::not_found("post", post_id));
        }
        require_text("text", &text, None)?;

        let comment = self
            .comments
            .create(Comment::new(post_id, author_id, text))
            .await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment added");
        Ok(comment)
    }

    pub async fn edit(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: Uuid,
        text: String,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.owned_comment(post_id, comment_id, actor).await?;
        require_text("text", &text, None)?;

        comment.text = text;
        let comment = self.comments.update(comment).await?;
        tracing::info!(comment_id = %comment_id, "Comment edited");
        Ok(comment)
    }

    pub async fn delete(&self, post_id: Uuid, comment_id: Uuid, actor: Uuid) -> Result<(), DomainError> {
        self.owned_comment(post_id, comment_id, actor).await?;
        self.comments.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    async fn owned_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: Uuid,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))?;

        if comment.author_id != actor {
            tracing::warn!(comment_id = %comment_id, user_id = %actor, "Rejected edit by non-author");
            return Err(DomainError::NotOwner("comment"));
        }
        Ok(comment)
    }
}
