use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters, extractable from query params (`?page=0&size=20`).
///
/// `page` is zero-based. `size` is clamped to `1..=100` when used.
#[derive(Debug, Clone, Deserialize)]
pub struct Pageable {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pageable {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset, saturating at `i64::MAX` so it always binds as a SQL integer.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.limit()).min(i64::MAX as u64)
    }
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let size = pageable.limit();
        Self {
            content,
            page: pageable.page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped() {
        assert_eq!(Pageable::new(0, 0).limit(), 1);
        assert_eq!(Pageable::new(0, 500).limit(), 100);
        assert_eq!(Pageable::new(3, 10).offset(), 30);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let pageable: Pageable =
            serde_json::from_str(r#"{"page":18446744073709551615,"size":20}"#).unwrap();
        assert_eq!(pageable.offset(), i64::MAX as u64);
        assert_eq!(Pageable::new(u64::MAX / 2, 100).offset(), i64::MAX as u64);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2], &Pageable::new(0, 2), 5);
        assert_eq!(page.total_pages, 3);
        let empty: Page<i32> = Page::new(vec![], &Pageable::default(), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], &Pageable::new(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_elements, 4);
    }
}
