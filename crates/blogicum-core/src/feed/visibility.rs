use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{PostRecord, Viewer};

use super::FeedScope;

/// Whether anyone at all may see the post at `now`.
pub fn is_public(record: &PostRecord, now: DateTime<Utc>) -> bool {
    record.post.is_published
        && record.post.pub_date <= now
        && record.category.as_ref().is_none_or(|c| c.is_published)
}

/// Visibility rule applied to a set of candidate posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only publicly visible posts.
    Public,
    /// Publicly visible posts plus everything authored by this user.
    OwnerOf(Uuid),
}

impl Visibility {
    /// Rule for a feed. Only an author browsing their own profile gets to see
    /// drafts and scheduled posts; the global and category feeds stay public
    /// for everyone.
    pub fn for_scope(scope: FeedScope, viewer: Viewer) -> Self {
        match scope {
            FeedScope::Author(author_id) if viewer.is(author_id) => Visibility::OwnerOf(author_id),
            _ => Visibility::Public,
        }
    }

    /// Rule for opening a single post.
    pub fn for_detail(viewer: Viewer) -> Self {
        viewer
            .user_id()
            .map_or(Visibility::Public, Visibility::OwnerOf)
    }

    pub fn permits(&self, record: &PostRecord, now: DateTime<Utc>) -> bool {
        is_public(record, now)
            || matches!(self, Visibility::OwnerOf(owner) if record.post.author_id == *owner)
    }
}
