use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of the `categories.slug` column.
pub const MAX_SLUG_LEN: usize = 64;

/// Category entity - an administrator-managed grouping of posts.
///
/// Posts in an unpublished category are hidden from every public feed,
/// whatever their own publication flag says.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: String, description: String, slug: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            description,
            slug,
            is_published: true,
            created_at: Utc::now(),
        }
    }

    /// Slugs are 1 to [`MAX_SLUG_LEN`] ASCII letters, digits, `-` and `_`.
    pub fn is_valid_slug(slug: &str) -> bool {
        (1..=MAX_SLUG_LEN).contains(&slug.len())
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(Category::is_valid_slug("travel_2024-spring"));
        assert!(Category::is_valid_slug(&"a".repeat(MAX_SLUG_LEN)));
        assert!(!Category::is_valid_slug(""));
        assert!(!Category::is_valid_slug("no spaces"));
        assert!(!Category::is_valid_slug("путешествия"));
        assert!(!Category::is_valid_slug(&"a".repeat(MAX_SLUG_LEN + 1)));
    }
}
