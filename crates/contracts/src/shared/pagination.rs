use serde::{Deserialize, Serialize};

/// Fixed dashboard page size
pub const PAGE_SIZE: usize = 10;

/// Position of a page inside a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page number (0 is treated as 1)
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PageInfo {
    pub fn new(requested_page: usize, page_size: usize, total_items: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page: requested_page.max(1),
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size),
        }
    }

    /// Index range of this page inside the full list; empty when out of range
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size);
        if start >= self.total_items {
            return 0..0;
        }
        start..(start + self.page_size).min(self.total_items)
    }
}

/// Cut one page out of `items`
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, PageInfo) {
    let info = PageInfo::new(page, page_size, items.len());
    (items[info.range()].to_vec(), info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling() {
        assert_eq!(PageInfo::new(1, PAGE_SIZE, 0).total_pages, 0);
        assert_eq!(PageInfo::new(1, PAGE_SIZE, 1).total_pages, 1);
        assert_eq!(PageInfo::new(1, PAGE_SIZE, 10).total_pages, 1);
        assert_eq!(PageInfo::new(1, PAGE_SIZE, 11).total_pages, 2);
        assert_eq!(PageInfo::new(1, PAGE_SIZE, 95).total_pages, 10);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        for n in 1..=45usize {
            let items: Vec<usize> = (0..n).collect();
            let pages = n.div_ceil(PAGE_SIZE);
            let (last, info) = paginate(&items, pages, PAGE_SIZE);
            assert_eq!(info.total_pages, pages);
            let expected = if n % PAGE_SIZE == 0 { PAGE_SIZE } else { n % PAGE_SIZE };
            assert_eq!(last.len(), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_pages_cover_items_in_order() {
        let items: Vec<usize> = (0..23).collect();
        let (first, _) = paginate(&items, 1, PAGE_SIZE);
        let (third, _) = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(first, (0..10).collect::<Vec<_>>());
        assert_eq!(third, vec![20, 21, 22]);
    }

    #[test]
    fn test_out_of_range_and_zero_pages() {
        let items: Vec<usize> = (0..5).collect();
        let (page, info) = paginate(&items, 4, PAGE_SIZE);
        assert!(page.is_empty());
        assert_eq!(info.page, 4);
        let (page, info) = paginate(&items, 0, PAGE_SIZE);
        assert_eq!(info.page, 1);
        assert_eq!(page.len(), 5);
        let (page, info) = paginate::<usize>(&[], 1, PAGE_SIZE);
        assert!(page.is_empty());
        assert_eq!(info.total_pages, 0);
    }
}
