//! Shared pagination state for paginated stores.
//!
//! One page-math implementation instead of a copy per store. The backend
//! paginates with `limit`/`offset`; the client tracks a 1-based page.

/// Pagination cursor and totals for one paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    items_per_page: u32,
    total_count: u64,
    search_query: Option<String>,
}

impl PageState {
    /// Creates state on page 1 with the given page size (clamped to ≥ 1).
    #[must_use]
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_count: 0,
            search_query: None,
        }
    }

    /// Current 1-based page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Records per page.
    #[must_use]
    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Total records across all pages, as last reported by the backend.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Active search term, if any.
    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// `ceil(total / per_page)`; zero when the listing is empty.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.items_per_page))
    }

    /// Offset of the first record of the current page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.items_per_page)
    }

    /// Moves to the given page (clamped to ≥ 1).
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Changes the page size and resets to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: u32) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Replaces the search term. `None` or an empty string clears it.
    pub fn set_search_query(&mut self, query: Option<String>) {
        self.search_query = query.filter(|q| !q.is_empty());
    }

    /// Records the backend-reported total.
    pub fn set_total_count(&mut self, total: u64) {
        self.total_count = total;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        let mut state = PageState::new(10);
        state.set_total_count(0);
        assert_eq!(state.total_pages(), 0);
        state.set_total_count(1);
        assert_eq!(state.total_pages(), 1);
        state.set_total_count(10);
        assert_eq!(state.total_pages(), 1);
        state.set_total_count(11);
        assert_eq!(state.total_pages(), 2);
        state.set_total_count(95);
        assert_eq!(state.total_pages(), 10);
    }

    #[test]
    fn test_offset_follows_page() {
        let mut state = PageState::new(20);
        assert_eq!(state.offset(), 0);
        state.set_page(3);
        assert_eq!(state.offset(), 40);
    }

    #[test]
    fn test_items_per_page_change_resets_page() {
        let mut state = PageState::new(10);
        state.set_page(5);
        state.set_items_per_page(25);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.items_per_page(), 25);
    }

    #[test]
    fn test_page_and_size_clamp_to_one() {
        let mut state = PageState::new(0);
        assert_eq!(state.items_per_page(), 1);
        state.set_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_search_query_empty_clears() {
        let mut state = PageState::default();
        state.set_search_query(Some("feria".to_owned()));
        assert_eq!(state.search_query(), Some("feria"));
        state.set_search_query(Some(String::new()));
        assert_eq!(state.search_query(), None);
        state.set_search_query(None);
        assert_eq!(state.search_query(), None);
    }
}
