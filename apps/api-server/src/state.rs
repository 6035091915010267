//! Application state - shared across all handlers.

use std::sync::Arc;

use actix_web::web;

use blogicum_core::feed::FeedComposer;
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use blogicum_core::services::{CategoryService, CommentService, FeedService, PostService};
use blogicum_infra::{Argon2PasswordService, InMemoryBlogStore, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
use blogicum_infra::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Storage handles, one per port.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self {
            users: store.clone(),
            categories: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub feed: Arc<FeedService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub categories: Arc<CategoryService>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = Self::connect(config).await;
        tracing::info!("Application state initialized");

        Self::from_parts(
            repos,
            FeedComposer::new(config.posts_per_page),
            config.jwt.clone(),
        )
    }

    pub fn from_parts(repos: Repositories, composer: FeedComposer, jwt: JwtConfig) -> Self {
        Self {
            feed: Arc::new(FeedService::new(
                repos.posts.clone(),
                repos.categories.clone(),
                repos.users.clone(),
                repos.comments.clone(),
                composer,
            )),
            posts: Arc::new(PostService::new(
                repos.posts.clone(),
                repos.categories.clone(),
            )),
            comments: Arc::new(CommentService::new(repos.posts, repos.comments)),
            categories: Arc::new(CategoryService::new(repos.categories, repos.users.clone())),
            users: repos.users,
            token_service: Arc::new(JwtTokenService::new(jwt)),
            password_service: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// Expose the state and the token service to handlers and extractors.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .app_data(web::Data::new(self.token_service.clone()));
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> Repositories {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Repositories::in_memory();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => Repositories::postgres(&connections),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Repositories::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory store");
        Repositories::in_memory()
    }
}
