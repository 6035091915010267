use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::PostRecord;

use super::{Page, PageNumber, Visibility, paginate};

/// A post on a feed page together with its comment count.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub record: PostRecord,
    pub comment_count: u64,
}

pub type FeedPage = Page<FeedEntry>;

/// Newest first; equal dates fall back to the larger id first.
pub fn feed_order(a: &PostRecord, b: &PostRecord) -> Ordering {
    b.post
        .pub_date
        .cmp(&a.post.pub_date)
        .then_with(|| b.post.id.cmp(&a.post.id))
}

/// Turns a scoped candidate collection into one page of a feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedComposer {
    page_size: usize,
}

impl FeedComposer {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Filter by `visibility`, order, and cut out the requested page.
    pub fn compose(
        &self,
        candidates: Vec<PostRecord>,
        visibility: Visibility,
        page: PageNumber,
        now: DateTime<Utc>,
    ) -> Page<PostRecord> {
        let mut visible: Vec<PostRecord> = candidates
            .into_iter()
            .filter(|record| visibility.permits(record, now))
            .collect();
        visible.sort_by(feed_order);

        paginate(visible, self.page_size, page)
    }
}

impl Default for FeedComposer {
    fn default() -> Self {
        Self::new(super::DEFAULT_POSTS_PER_PAGE)
    }
}

impl Page<PostRecord> {
    pub fn post_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|r| r.post.id).collect()
    }

    /// Attach comment counts. Posts missing from `counts` have none.
    pub fn annotate(self, counts: &HashMap<Uuid, u64>) -> FeedPage {
        self.map(|record| FeedEntry {
            comment_count: counts.get(&record.post.id).copied().unwrap_or(0),
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{Author, Post};

    fn record(id: u128, author_id: Uuid, pub_date: DateTime<Utc>, published: bool) -> PostRecord {
        let mut post = Post::new(author_id, format!("Post {id}"), "Text".to_string(), pub_date);
        post.id = Uuid::from_u128(id);
        post.is_published = published;
        PostRecord {
            post,
            author: Author {
                id: author_id,
                username: "writer".to_string(),
            },
            category: None,
        }
    }

    fn ids(page: &Page<PostRecord>) -> Vec<u128> {
        page.items.iter().map(|r| r.post.id.as_u128()).collect()
    }

    #[test]
    fn test_orders_newest_first_with_id_tiebreak() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let same = now - Duration::hours(2);
        let candidates = vec![
            record(1, author, now - Duration::hours(5), true),
            record(2, author, same, true),
            record(3, author, now - Duration::hours(1), true),
            record(4, author, same, true),
        ];

        let page = FeedComposer::new(10).compose(
            candidates,
            Visibility::Public,
            PageNumber::FIRST,
            now,
        );

        assert_eq!(ids(&page), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_filters_before_paginating() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let candidates: Vec<_> = (1..=6)
            .map(|i| {
                record(
                    i,
                    author,
                    now - Duration::minutes(i as i64),
                    i % 2 == 0,
                )
            })
            .collect();

        let page = FeedComposer::new(2).compose(
            candidates,
            Visibility::Public,
            PageNumber::FIRST,
            now,
        );

        assert_eq!(ids(&page), vec![2, 4]);
        assert_eq!(page.meta.total_pages, 2);
    }

    #[test]
    fn test_owner_visibility_includes_drafts() {
        let now = Utc::now();
        let owner = Uuid::new_v4();
        let candidates = vec![
            record(1, owner, now - Duration::hours(1), false),
            record(2, owner, now + Duration::days(3), true),
            record(3, owner, now - Duration::hours(2), true),
        ];

        let public = FeedComposer::new(10).compose(
            candidates.clone(),
            Visibility::Public,
            PageNumber::FIRST,
            now,
        );
        let own = FeedComposer::new(10).compose(
            candidates,
            Visibility::OwnerOf(owner),
            PageNumber::FIRST,
            now,
        );

        assert_eq!(ids(&public), vec![3]);
        assert_eq!(ids(&own), vec![2, 1, 3]);
    }

    #[test]
    fn test_annotate_defaults_to_zero() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let page = FeedComposer::new(10).compose(
            vec![
                record(1, author, now - Duration::hours(1), true),
                record(2, author, now - Duration::hours(2), true),
            ],
            Visibility::Public,
            PageNumber::FIRST,
            now,
        );
        let counts = HashMap::from([(Uuid::from_u128(2), 3)]);

        let annotated = page.annotate(&counts);

        let pairs: Vec<_> = annotated
            .items
            .iter()
            .map(|e| (e.record.post.id.as_u128(), e.comment_count))
            .collect();
        assert_eq!(pairs, vec![(1, 0), (2, 3)]);
    }

    #[test]
    fn test_zero_page_size_still_pages_one_by_one() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let candidates = vec![
            record(1, author, now - Duration::hours(1), true),
            record(2, author, now - Duration::hours(2), true),
        ];

        let page = FeedComposer::new(0).compose(
            candidates,
            Visibility::Public,
            PageNumber::new(2),
            now,
        );

        assert_eq!(ids(&page), vec![2]);
        assert_eq!(page.meta.total_pages, 2);
    }
}
