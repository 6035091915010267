//! A single in-memory store implementing every repository port.
//!
//! One lock guards all tables so a read sees a consistent snapshot, and the
//! cascades mirror the foreign keys of the relational schema.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::domain::{Author, Category, Comment, Post, PostRecord, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::FeedScope;
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn record(&self, post: &Post) -> Option<PostRecord> {
        let author = self.users.get(&post.author_id)?;
        Some(PostRecord {
            post: post.clone(),
            author: Author {
                id: author.id,
                username: author.username.clone(),
            },
            category: post
                .category_id
                .and_then(|id| self.categories.get(&id))
                .cloned(),
        })
    }
}

/// In-memory store. Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryBlogStore {
    tables: RwLock<Tables>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_new<T>(table: &mut HashMap<Uuid, T>, id: Uuid, entity: T) -> Result<T, RepoError>
where
    T: Clone,
{
    if table.contains_key(&id) {
        return Err(RepoError::Constraint(format!("duplicate id {id}")));
    }
    table.insert(id, entity.clone());
    Ok(entity)
}

fn replace<T>(table: &mut HashMap<Uuid, T>, id: Uuid, entity: T) -> Result<T, RepoError>
where
    T: Clone,
{
    let slot = table.get_mut(&id).ok_or(RepoError::NotFound)?;
    *slot = entity.clone();
    Ok(entity)
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(RepoError::Constraint("username or email already taken".to_string()));
        }
        insert_new(&mut tables.users, user.id, user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        replace(&mut self.tables.write().await.users, user.id, user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        let orphaned: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|_, p| p.author_id != id);
        tables
            .comments
            .retain(|_, c| c.author_id != id && !orphaned.contains(&c.post_id));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn create(&self, category: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.categories.values().any(|c| c.slug == category.slug) {
            return Err(RepoError::Constraint(format!("slug '{}' taken", category.slug)));
        }
        insert_new(&mut tables.categories, category.id, category)
    }

    async fn update(&self, category: Category) -> Result<Category, RepoError> {
        replace(&mut self.tables.write().await.categories, category.id, category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.categories.remove(&id).ok_or(RepoError::NotFound)?;
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("unknown author".to_string()));
        }
        insert_new(&mut tables.posts, post.id, post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        replace(&mut self.tables.write().await.posts, post.id, post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_record(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).and_then(|p| tables.record(p)))
    }

    async fn find_candidates(&self, scope: FeedScope) -> Result<Vec<PostRecord>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| match scope {
                FeedScope::Global => true,
                FeedScope::Category(id) => p.category_id == Some(id),
                FeedScope::Author(id) => p.author_id == id,
            })
            .filter_map(|p| tables.record(p))
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint("unknown post".to_string()));
        }
        insert_new(&mut tables.comments, comment.id, comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        replace(&mut self.tables.write().await.comments, comment.id, comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn count_by_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for comment in tables.comments.values() {
            if post_ids.contains(&comment.post_id) {
                *counts.entry(comment.post_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    async fn seed_user(store: &InMemoryBlogStore, name: &str) -> User {
        BaseRepository::<User, Uuid>::create(
            store,
            User::new(name.to_string(), format!("{name}@example.com"), "hash".to_string()),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryBlogStore::new();
        seed_user(&store, "leo").await;

        let result = BaseRepository::<User, Uuid>::create(
            &store,
            User::new("leo".to_string(), "other@example.com".to_string(), "h".to_string()),
        )
        .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_deleting_post_removes_its_comments() {
        let store = InMemoryBlogStore::new();
        let author = seed_user(&store, "leo").await;
        let post = BaseRepository::<Post, Uuid>::create(
            &store,
            Post::new(author.id, "T".to_string(), "B".to_string(), Utc::now()),
        )
        .await
        .unwrap();
        BaseRepository::<Comment, Uuid>::create(&store, Comment::new(post.id, author.id, "hi".to_string()))
            .await
            .unwrap();

        BaseRepository::<Post, Uuid>::delete(&store, post.id).await.unwrap();

        let counts = store.count_by_posts(&[post.id]).await.unwrap();
        assert!(counts.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_category_detaches_posts() {
        let store = InMemoryBlogStore::new();
        let author = seed_user(&store, "leo").await;
        let category = BaseRepository::<Category, Uuid>::create(
            &store,
            Category::new("Travel".to_string(), "Trips".to_string(), "travel".to_string()),
        )
        .await
        .unwrap();
        let mut post = Post::new(author.id, "T".to_string(), "B".to_string(), Utc::now());
        post.category_id = Some(category.id);
        let post = BaseRepository::<Post, Uuid>::create(&store, post).await.unwrap();

        BaseRepository::<Category, Uuid>::delete(&store, category.id).await.unwrap();

        let record = store.find_record(post.id).await.unwrap().unwrap();
        assert_eq!(record.post.category_id, None);
        assert!(record.category.is_none());
    }
}
