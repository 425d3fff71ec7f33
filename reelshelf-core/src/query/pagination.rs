//! Page-size clamping and slicing of an already sorted result set.

use serde::{Deserialize, Serialize};

/// Allowed page sizes. Requests outside `[min, max]` are clamped, absent
/// sizes fall back to `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl PageBounds {
    pub const fn new(min: u32, max: u32, default: u32) -> Self {
        Self { min, max, default }
    }

    /// Clamp a requested size into range. Never panics, even for inverted
    /// bounds: `max` wins in that case.
    pub fn clamp(&self, requested: i64) -> u32 {
        let floor = i64::from(self.min.max(1));
        let clamped = requested.max(floor).min(i64::from(self.max.max(1)));
        u32::try_from(clamped).unwrap_or(self.max)
    }
}

impl Default for PageBounds {
    fn default() -> Self {
        Self::new(10, 100, 10)
    }
}

/// A validated page request: `page >= 1` and `page_size` within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64, bounds: &PageBounds) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        Self {
            page,
            page_size: bounds.clamp(page_size),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }
}

/// One page of results plus the bookkeeping a client needs to render
/// pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    #[serde(rename = "currentPage")]
    pub page: u32,
    #[serde(rename = "perPage")]
    pub page_size: u32,
    pub total: usize,
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        paginate(Vec::new(), request)
    }
}

/// Slice `sorted` down to the requested page.
///
/// `total` always reflects the full input and `last_page` is at least 1.
/// Pages beyond the end yield no items.
pub fn paginate<T>(sorted: Vec<T>, request: PageRequest) -> Page<T> {
    let total = sorted.len();
    let size = request.page_size() as usize;
    let last_page = total.div_ceil(size).max(1);

    let items = sorted
        .into_iter()
        .skip(request.offset())
        .take(size)
        .collect();

    Page {
        items,
        page: request.page(),
        page_size: request.page_size(),
        total,
        last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
    }
}
