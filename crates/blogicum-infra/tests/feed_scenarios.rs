//! End-to-end behaviour of the blog services over the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use blogicum_core::DomainError;
use blogicum_core::domain::{Category, User, Viewer};
use blogicum_core::feed::{FeedComposer, FeedPage, PageNumber};
use blogicum_core::ports::{BaseRepository, UserRepository};
use blogicum_core::services::{
    CategoryInput, CategoryService, CategoryUpdate, CommentService, FeedService, PostInput,
    PostService,
};
use blogicum_infra::InMemoryBlogStore;

struct Blog {
    store: Arc<InMemoryBlogStore>,
    feed: FeedService,
    posts: PostService,
    comments: CommentService,
    categories: CategoryService,
}

impl Blog {
    fn new(page_size: usize) -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self {
            feed: FeedService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                FeedComposer::new(page_size),
            ),
            posts: PostService::new(store.clone(), store.clone()),
            comments: CommentService::new(store.clone(), store.clone()),
            categories: CategoryService::new(store.clone(), store.clone()),
            store,
        }
    }

    async fn user(&self, name: &str) -> User {
        BaseRepository::<User, Uuid>::create(
            self.store.as_ref(),
            User::new(name.to_string(), format!("{name}@example.com"), "hash".to_string()),
        )
        .await
        .unwrap()
    }

    async fn staff(&self, name: &str) -> User {
        let mut user = User::new(name.to_string(), format!("{name}@example.com"), "h".to_string());
        user.is_staff = true;
        BaseRepository::<User, Uuid>::create(self.store.as_ref(), user)
            .await
            .unwrap()
    }

    async fn category(&self, slug: &str, is_published: bool) -> Category {
        let admin = match self.store.find_by_username("admin").await.unwrap() {
            Some(admin) => admin,
            None => self.staff("admin").await,
        };
        self.categories
            .create(
                admin.id,
                CategoryInput {
                    title: slug.to_string(),
                    description: "About".to_string(),
                    slug: slug.to_string(),
                    is_published,
                },
            )
            .await
            .unwrap()
    }

    async fn post(&self, author: &User, title: &str, input: impl FnOnce(&mut PostInput)) -> Uuid {
        let mut post = PostInput {
            title: title.to_string(),
            text: "Body".to_string(),
            pub_date: Some(Utc::now() - Duration::hours(1)),
            is_published: None,
            category_slug: None,
            location: None,
        };
        input(&mut post);
        self.posts.create(author.id, post).await.unwrap().post.id
    }
}

fn titles(page: &FeedPage) -> Vec<String> {
    page.items
        .iter()
        .map(|e| e.record.post.title.clone())
        .collect()
}

async fn global_page(blog: &Blog, raw: Option<&str>) -> FeedPage {
    blog.feed
        .global_feed(Viewer::Anonymous, PageNumber::parse(raw))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_unpublished_category_hides_post_except_on_authors_detail_view() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    blog.category("announcements", false).await;
    let id = blog
        .post(&author, "Hidden news", |p| {
            p.category_slug = Some("announcements".to_string())
        })
        .await;

    for viewer in [Viewer::Anonymous, Viewer::Authenticated(author.id)] {
        let page = blog.feed.global_feed(viewer, PageNumber::FIRST).await.unwrap();
        assert!(page.items.is_empty());
    }

    let detail = blog
        .feed
        .post_detail(id, Viewer::Authenticated(author.id))
        .await
        .unwrap();
    assert_eq!(detail.record.post.title, "Hidden news");

    let anonymous = blog.feed.post_detail(id, Viewer::Anonymous).await;
    assert!(matches!(anonymous, Err(DomainError::NotFound { .. })));

    let category = blog
        .feed
        .category_feed("announcements", Viewer::Authenticated(author.id), PageNumber::FIRST)
        .await;
    assert!(matches!(category, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_own_profile_shows_scheduled_posts_to_owner_only() {
    let blog = Blog::new(10);
    let owner = blog.user("leo").await;
    let stranger = blog.user("mia").await;
    blog.post(&owner, "Scheduled", |p| {
        p.pub_date = Some(Utc::now() + Duration::days(2))
    })
    .await;
    blog.post(&owner, "Draft", |p| p.is_published = Some(false)).await;
    blog.post(&owner, "Live", |_| {}).await;

    let own = blog
        .feed
        .profile_feed("leo", Viewer::Authenticated(owner.id), PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(titles(&own.page), vec!["Scheduled", "Live", "Draft"]);

    for viewer in [Viewer::Anonymous, Viewer::Authenticated(stranger.id)] {
        let other = blog
            .feed
            .profile_feed("leo", viewer, PageNumber::FIRST)
            .await
            .unwrap();
        assert_eq!(titles(&other.page), vec!["Live"]);
    }

    let global = blog
        .feed
        .global_feed(Viewer::Authenticated(owner.id), PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(titles(&global), vec!["Live"]);
}

#[tokio::test]
async fn test_comment_count_follows_new_comments() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    let reader = blog.user("mia").await;
    let id = blog.post(&author, "Hello", |_| {}).await;

    let before = blog.feed.global_feed(Viewer::Anonymous, PageNumber::FIRST).await.unwrap();
    assert_eq!(before.items[0].comment_count, 0);

    blog.comments
        .add(id, reader.id, "Nice".to_string())
        .await
        .unwrap();

    let after = blog.feed.global_feed(Viewer::Anonymous, PageNumber::FIRST).await.unwrap();
    assert_eq!(after.items[0].comment_count, 1);
}

#[tokio::test]
async fn test_out_of_range_pages_are_normalized() {
    let blog = Blog::new(2);
    let author = blog.user("leo").await;
    for hours in 1..=5 {
        blog.post(&author, &format!("Post {hours}"), |p| {
            p.pub_date = Some(Utc::now() - Duration::hours(hours))
        })
        .await;
    }

    let first = global_page(&blog, Some("1")).await;
    let last = global_page(&blog, Some("3")).await;
    assert_eq!(titles(&first), vec!["Post 1", "Post 2"]);
    assert_eq!(titles(&last), vec!["Post 5"]);

    assert_eq!(titles(&global_page(&blog, Some("99")).await), titles(&last));
    assert_eq!(titles(&global_page(&blog, Some("0")).await), titles(&first));
    assert_eq!(titles(&global_page(&blog, Some("-3")).await), titles(&first));
    assert_eq!(titles(&global_page(&blog, Some("two")).await), titles(&first));
    assert_eq!(titles(&global_page(&blog, None).await), titles(&first));
    assert_eq!(last.meta.total_pages, 3);
    assert!(last.meta.has_previous && !last.meta.has_next);
}

#[tokio::test]
async fn test_category_feed_lists_only_its_public_posts() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    blog.category("travel", true).await;
    blog.post(&author, "Trip", |p| p.category_slug = Some("travel".to_string()))
        .await;
    blog.post(&author, "Trip draft", |p| {
        p.category_slug = Some("travel".to_string());
        p.is_published = Some(false);
    })
    .await;
    blog.post(&author, "Elsewhere", |_| {}).await;

    let feed = blog
        .feed
        .category_feed("travel", Viewer::Authenticated(author.id), PageNumber::FIRST)
        .await
        .unwrap();

    assert_eq!(feed.category.slug, "travel");
    assert_eq!(titles(&feed.page), vec!["Trip"]);
}

#[tokio::test]
async fn test_missing_user_and_category_are_not_found() {
    let blog = Blog::new(10);

    let profile = blog
        .feed
        .profile_feed("nobody", Viewer::Anonymous, PageNumber::FIRST)
        .await;
    let category = blog
        .feed
        .category_feed("nothing", Viewer::Anonymous, PageNumber::FIRST)
        .await;

    assert!(matches!(profile, Err(DomainError::NotFound { .. })));
    assert!(matches!(category, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_only_the_author_can_edit_or_delete_a_post() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    let intruder = blog.user("eve").await;
    let id = blog.post(&author, "Mine", |_| {}).await;
    let edit = PostInput {
        title: "Hijacked".to_string(),
        text: "Body".to_string(),
        pub_date: None,
        is_published: None,
        category_slug: None,
        location: Some("Berlin".to_string()),
    };

    let rejected = blog.posts.update(id, intruder.id, edit.clone()).await;
    assert!(matches!(rejected, Err(DomainError::NotOwner("post"))));
    assert!(matches!(
        blog.posts.delete(id, intruder.id).await,
        Err(DomainError::NotOwner("post"))
    ));

    let updated = blog.posts.update(id, author.id, edit).await.unwrap();
    assert_eq!(updated.post.title, "Hijacked");
    assert_eq!(updated.post.location.as_deref(), Some("Berlin"));

    blog.posts.delete(id, author.id).await.unwrap();
    let gone = blog.feed.post_detail(id, Viewer::Authenticated(author.id)).await;
    assert!(matches!(gone, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_post_validation() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    let input = PostInput {
        title: "  ".to_string(),
        text: "Body".to_string(),
        pub_date: None,
        is_published: None,
        category_slug: None,
        location: None,
    };

    let blank = blog.posts.create(author.id, input.clone()).await;
    let long = blog
        .posts
        .create(
            author.id,
            PostInput {
                title: "x".repeat(257),
                ..input.clone()
            },
        )
        .await;
    let unknown_category = blog
        .posts
        .create(
            author.id,
            PostInput {
                title: "Fine".to_string(),
                category_slug: Some("nope".to_string()),
                ..input
            },
        )
        .await;

    assert!(matches!(blank, Err(DomainError::Validation(_))));
    assert!(matches!(long, Err(DomainError::Validation(_))));
    assert!(matches!(unknown_category, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_comments_are_listed_oldest_first_and_guarded_by_author() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    let reader = blog.user("mia").await;
    let id = blog.post(&author, "Hello", |_| {}).await;
    let other_post = blog.post(&author, "Other", |_| {}).await;

    let first = blog.comments.add(id, reader.id, "First".to_string()).await.unwrap();
    blog.comments.add(id, author.id, "Second".to_string()).await.unwrap();

    let detail = blog.feed.post_detail(id, Viewer::Anonymous).await.unwrap();
    let texts: Vec<_> = detail.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["First", "Second"]);

    let by_author = blog
        .comments
        .edit(id, first.id, author.id, "Edited".to_string())
        .await;
    assert!(matches!(by_author, Err(DomainError::NotOwner("comment"))));

    let wrong_post = blog.comments.delete(other_post, first.id, reader.id).await;
    assert!(matches!(wrong_post, Err(DomainError::NotFound { .. })));

    let edited = blog
        .comments
        .edit(id, first.id, reader.id, "Edited".to_string())
        .await
        .unwrap();
    assert_eq!(edited.text, "Edited");

    blog.comments.delete(id, first.id, reader.id).await.unwrap();
    let detail = blog.feed.post_detail(id, Viewer::Anonymous).await.unwrap();
    assert_eq!(detail.comments.len(), 1);
}

#[tokio::test]
async fn test_cannot_comment_on_someone_elses_draft() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    let reader = blog.user("mia").await;
    let draft = blog.post(&author, "Draft", |p| p.is_published = Some(false)).await;

    let result = blog.comments.add(draft, reader.id, "Hi".to_string()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));

    blog.comments
        .add(draft, author.id, "Note to self".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_category_administration_requires_staff() {
    let blog = Blog::new(10);
    let user = blog.user("leo").await;
    let input = CategoryInput {
        title: "Travel".to_string(),
        description: "Trips".to_string(),
        slug: "travel".to_string(),
        is_published: true,
    };

    let denied = blog.categories.create(user.id, input.clone()).await;
    assert!(matches!(denied, Err(DomainError::Unauthorized)));

    blog.category("travel", true).await;
    let admin = blog.store.find_by_username("admin").await.unwrap().unwrap();
    let duplicate = blog.categories.create(admin.id, input).await;
    assert!(matches!(duplicate, Err(DomainError::Duplicate(_))));

    let bad_slug = blog
        .categories
        .create(
            admin.id,
            CategoryInput {
                title: "Bad".to_string(),
                description: "Bad".to_string(),
                slug: "no spaces".to_string(),
                is_published: true,
            },
        )
        .await;
    assert!(matches!(bad_slug, Err(DomainError::Validation(_))));

    let hidden = blog
        .categories
        .update(
            "travel",
            admin.id,
            CategoryUpdate {
                title: "Travel".to_string(),
                description: "Trips".to_string(),
                is_published: false,
            },
        )
        .await
        .unwrap();
    assert!(!hidden.is_published);
}

#[tokio::test]
async fn test_edit_without_publication_flag_keeps_draft() {
    let blog = Blog::new(10);
    let author = blog.user("leo").await;
    let draft = blog.post(&author, "Draft", |p| p.is_published = Some(false)).await;

    let edited = blog
        .posts
        .update(
            draft,
            author.id,
            PostInput {
                title: "Draft, second pass".to_string(),
                text: "Body".to_string(),
                pub_date: None,
                is_published: None,
                category_slug: None,
                location: None,
            },
        )
        .await
        .unwrap();

    assert!(!edited.post.is_published);
    assert!(titles(&global_page(&blog, None).await).is_empty());
}

#[tokio::test]
async fn test_slug_longer_than_column_is_rejected() {
    let blog = Blog::new(10);
    let admin = blog.staff("admin").await;

    let result = blog
        .categories
        .create(
            admin.id,
            CategoryInput {
                title: "Long".to_string(),
                description: "Long slug".to_string(),
                slug: "a".repeat(65),
                is_published: true,
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}
