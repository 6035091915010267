//! Feed composition - which posts a viewer may see, in what order, one page at
//! a time.
//!
//! Every feed (global, category, profile) and the single-post view go through
//! the same [`Visibility`] predicate, so the owner bypass lives in exactly one
//! place.

mod composer;
mod pagination;
mod visibility;

pub use composer::{FeedComposer, FeedEntry, FeedPage, feed_order};
pub use pagination::{DEFAULT_POSTS_PER_PAGE, Page, PageMeta, PageNumber, paginate};
pub use visibility::{Visibility, is_public};

use uuid::Uuid;

/// Which rows a candidate query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post.
    Global,
    /// Posts in one category.
    Category(Uuid),
    /// Posts written by one user.
    Author(Uuid),
}
