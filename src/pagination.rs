use serde::Serialize;

/// Default number of items per listing page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
/// Upper bound accepted for the `per_page` parameter.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One page of a filtered result set together with its paging envelope.
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Count of records matching the filter across all pages.
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Assembles a page result. A zero `page` is treated as the first page so
    /// callers bypassing the HTTP layer never produce a negative offset.
    pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

}
