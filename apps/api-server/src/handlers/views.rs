//! Domain to wire conversions.

use blogicum_core::domain::{Category, Comment, PostRecord, User};
use blogicum_core::feed::{FeedPage, PageMeta};
use blogicum_shared::dto::{
    AuthorResponse, CategoryResponse, CommentResponse, FeedResponse, PageInfo, PostResponse,
    UserResponse,
};

pub fn post(record: PostRecord, comment_count: u64) -> PostResponse {
    let PostRecord {
        post,
        author,
        category,
    } = record;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        is_published: post.is_published,
        location: post.location,
        author: AuthorResponse {
            id: author.id,
            username: author.username,
        },
        category: category.map(self::category),
        comment_count,
        created_at: post.created_at,
    }
}

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
        is_published: category.is_published,
    }
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        created_at: user.created_at,
    }
}

fn page_info(meta: PageMeta) -> PageInfo {
    PageInfo {
        number: meta.number,
        total_pages: meta.total_pages,
        has_previous: meta.has_previous,
        has_next: meta.has_next,
    }
}

pub fn feed(page: FeedPage) -> FeedResponse {
    FeedResponse {
        page: page_info(page.meta),
        items: page
            .items
            .into_iter()
            .map(|entry| post(entry.record, entry.comment_count))
            .collect(),
    }
}
