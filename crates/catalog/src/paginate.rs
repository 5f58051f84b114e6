/// Number of items in the first page of the display window.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Computes a prefix-growing display window over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A page size of zero is bumped to one so `load_more` always makes progress.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Window size for a freshly derived result set of `len` items.
    pub fn initial(&self, len: usize) -> usize {
        self.page_size.min(len)
    }

    /// Grow the window by one page, clamped to `len`.
    pub fn load_more(&self, current: usize, len: usize) -> usize {
        current.saturating_add(self.page_size).min(len)
    }

    /// The displayed prefix of `items`.
    pub fn window<'a, T>(&self, items: &'a [T], size: usize) -> &'a [T] {
        &items[..size.min(items.len())]
    }
}
