/// One page of results plus the totals needed for pagination metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, total_count: u64, current_page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(u64::from(page_size)) as u32;
        PagedList {
            items,
            current_page,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Zero-based row offset of this page.
    pub fn offset(current_page: u32, page_size: u32) -> u64 {
        u64::from(current_page.saturating_sub(1)) * u64::from(page_size)
    }
}
