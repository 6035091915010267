//! Category administration. Staff only.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, MAX_SHORT_TEXT_LEN, MAX_SLUG_LEN};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, UserRepository};

use super::require_text;

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub title: String,
    pub description: String,
    pub is_published: bool,
}

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { categories, users }
    }

    pub async fn create(&self, actor: Uuid, input: CategoryInput) -> Result<Category, DomainError> {
        self.require_staff(actor).await?;
        require_text("title", &input.title, Some(MAX_SHORT_TEXT_LEN))?;
        require_text("description", &input.description, None)?;
        if !Category::is_valid_slug(&input.slug) {
            return Err(DomainError::Validation(format!(
                "slug must be 1-{MAX_SLUG_LEN} letters, digits, '-' or '_'"
            )));
        }
        if self.categories.find_by_slug(&input.slug).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "category '{}' already exists",
                input.slug
            )));
        }

        let mut category = Category::new(input.title, input.description, input.slug);
        category.is_published = input.is_published;

        let category = self.categories.create(category).await?;
        tracing::info!(slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        slug: &str,
        actor: Uuid,
        input: CategoryUpdate,
    ) -> Result<Category, DomainError> {
        self.require_staff(actor).await?;
        require_text("title", &input.title, Some(MAX_SHORT_TEXT_LEN))?;
        require_text("description", &input.description, None)?;

        let mut category = self
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("category", slug))?;
        category.title = input.title;
        category.description = input.description;
        category.is_published = input.is_published;

        let category = self.categories.update(category).await?;
        tracing::info!(slug = %slug, is_published = category.is_published, "Category updated");
        Ok(category)
    }

    async fn require_staff(&self, actor: Uuid) -> Result<(), DomainError> {
        match self.users.find_by_id(actor).await? {
            Some(user) if user.is_staff => Ok(()),
            _ => Err(DomainError::Unauthorized),
        }
    }
}
