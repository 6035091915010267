use serde::Serialize;

/// Posts per page unless overridden at startup.
pub const DEFAULT_POSTS_PER_PAGE: usize = 10;

/// A 1-based page number parsed permissively from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageNumber(usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(number: usize) -> Self {
        Self(number.max(1))
    }

    /// Absent, non-numeric, zero and negative input all mean page 1.
    /// Numbers too large to represent are kept as "very far", which the
    /// paginator clamps to the last page.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::FIRST;
        };

        match raw.parse::<i64>() {
            Ok(n) if n > 0 => Self(usize::try_from(n).unwrap_or(usize::MAX)),
            Ok(_) => Self::FIRST,
            Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                Self(usize::MAX)
            }
            Err(_) => Self::FIRST,
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Navigation data for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub number: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// One slice of an ordered collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Slice `items` into pages of `page_size` and return the requested one.
///
/// A request past the end yields the last page. An empty collection still has
/// one (empty) page.
pub fn paginate<T>(items: Vec<T>, page_size: usize, requested: PageNumber) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let number = requested.get().min(total_pages);
    let start = (number - 1) * page_size;

    Page {
        items: items.into_iter().skip(start).take(page_size).collect(),
        meta: PageMeta {
            number,
            total_pages,
            has_previous: number > 1,
            has_next: number < total_pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_number() {
        assert_eq!(PageNumber::parse(None), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("abc")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("0")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("-4")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("2.5")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some(" 3 ")).get(), 3);
        assert_eq!(
            PageNumber::parse(Some("99999999999999999999999")).get(),
            usize::MAX
        );
    }

    #[test]
    fn test_paginate_middle_page() {
        let page = paginate((1..=25).collect::<Vec<i32>>(), 10, PageNumber::new(2));

        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(
            page.meta,
            PageMeta {
                number: 2,
                total_pages: 3,
                has_previous: true,
                has_next: true,
            }
        );
    }

    #[test]
    fn test_paginate_past_end_returns_last_page() {
        let last = paginate((1..=25).collect::<Vec<_>>(), 10, PageNumber::new(3));
        let beyond = paginate((1..=25).collect::<Vec<_>>(), 10, PageNumber::new(40));

        assert_eq!(beyond.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(beyond.items, last.items);
        assert_eq!(beyond.meta, last.meta);
        assert!(!beyond.meta.has_next);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::<u8>::new(), 10, PageNumber::new(5));

        assert!(page.items.is_empty());
        assert_eq!(page.meta.number, 1);
        assert_eq!(page.meta.total_pages, 1);
        assert!(!page.meta.has_previous);
        assert!(!page.meta.has_next);
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let page = paginate((1..=20).collect::<Vec<_>>(), 10, PageNumber::new(2));

        assert_eq!(page.meta.total_pages, 2);
        assert_eq!(page.items.len(), 10);
    }
}
