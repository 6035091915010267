//! PostgreSQL repository implementations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use blogicum_core::domain::{Author, Category, Comment, PostRecord, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::FeedScope;
use blogicum_core::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[derive(Debug, FromQueryResult)]
struct CommentCount {
    post_id: Uuid,
    count: i64,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        tracing::debug!(slug, "Finding category by slug");

        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

impl PostgresPostRepository {
    /// Resolve author usernames for a batch of joined rows. Rows whose author
    /// has disappeared are dropped.
    async fn attach_authors(
        &self,
        rows: Vec<(post::Model, Option<category::Model>)>,
    ) -> Result<Vec<PostRecord>, RepoError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: HashSet<Uuid> = rows.iter().map(|(p, _)| p.author_id).collect();
        let usernames: HashMap<Uuid, String> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(post, category)| {
                let username = usernames.get(&post.author_id)?.clone();
                Some(PostRecord {
                    author: Author {
                        id: post.author_id,
                        username,
                    },
                    post: post.into(),
                    category: category.map(Into::into),
                })
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_record(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(self
            .attach_authors(row.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    async fn find_candidates(&self, scope: FeedScope) -> Result<Vec<PostRecord>, RepoError> {
        tracing::debug!(?scope, "Loading feed candidates");

        let query = match scope {
            FeedScope::Global => PostEntity::find(),
            FeedScope::Category(id) => PostEntity::find().filter(post::Column::CategoryId.eq(id)),
            FeedScope::Author(id) => PostEntity::find().filter(post::Column::AuthorId.eq(id)),
        };

        let rows = query
            .find_also_related(CategoryEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        self.attach_authors(rows).await
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(Expr::col(comment::Column::Id).count(), "count")
            .filter(comment::Column::PostId.is_in(post_ids.iter().copied()))
            .group_by(comment::Column::PostId)
            .into_model::<CommentCount>()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.post_id, u64::try_from(row.count).unwrap_or(0)))
            .collect())
    }
}
