//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod user;
mod viewer;

pub use category::{Category, MAX_SLUG_LEN};
pub use comment::Comment;
pub use post::{Author, Post, PostRecord};
pub use user::User;
pub use viewer::Viewer;

/// Maximum length of titles, names and other short text fields.
pub const MAX_SHORT_TEXT_LEN: usize = 256;
