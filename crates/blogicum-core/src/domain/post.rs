use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Post entity - a blog publication.
///
/// A post dated in the future is scheduled, not published, until its
/// `pub_date` passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    pub location: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id,
            category_id: None,
            title,
            text,
            location: None,
            pub_date,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

/// Public part of a post's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// A post as loaded from storage together with what feeds need to judge and
/// display it.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub post: Post,
    pub author: Author,
    pub category: Option<Category>,
}
