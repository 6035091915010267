//! Application services - orchestrate repositories around the domain rules.

mod category_service;
mod comment_service;
mod feed_service;
mod post_service;

pub use category_service::{CategoryInput, CategoryService, CategoryUpdate};
pub use comment_service::CommentService;
pub use feed_service::{CategoryFeed, FeedService, PostDetail, ProfileFeed};
pub use post_service::{PostInput, PostService};

use crate::error::DomainError;

/// Reject blank values and values longer than `max` characters.
pub(crate) fn require_text(field: &str, value: &str, max: Option<usize>) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    if let Some(max) = max
        && value.chars().count() > max
    {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
