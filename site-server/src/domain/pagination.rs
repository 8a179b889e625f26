/// 1-based page request. Anything below 1 is treated as the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl PageRequest {
    pub(crate) fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Lenient parse of a raw `page` query value: missing, malformed or
    /// non-positive values fall back to page 1.
    pub(crate) fn from_query(raw: Option<&str>, page_size: u32) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
            .unwrap_or(1);
        Self::new(page, page_size)
    }

    pub(crate) fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Paginated<T> {
    pub(crate) items: Vec<T>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

impl<T> Paginated<T> {
    pub(crate) fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total: total.max(0),
        }
    }

    pub(crate) fn total_pages(&self) -> u32 {
        let page_size = i64::from(self.page_size.max(1));
        let pages = (self.total + page_size - 1) / page_size;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub(crate) fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub(crate) fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}
