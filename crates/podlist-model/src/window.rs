/// Number of episodes on one listing page of the directory.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A caller-requested range of episodes, by position in newest-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeWindow {
    pub offset: usize,
    pub count: usize,
}

/// The run of 1-indexed listing pages needed to cover a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    /// First page to fetch (1-indexed).
    pub first: usize,
    /// Number of consecutive pages to fetch.
    pub len: usize,
}

impl EpisodeWindow {
    pub fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    /// Compute which listing pages cover this window.
    ///
    /// A window that does not start on a page boundary needs enough pages
    /// for `count` plus the part of the first page before `offset`.
    /// A `page_size` of zero is treated as one. Arithmetic saturates, so
    /// absurd windows produce a huge span rather than an overflow.
    pub fn pages(&self, page_size: usize) -> PageSpan {
        let page_size = page_size.max(1);
        PageSpan {
            first: (self.offset / page_size).saturating_add(1),
            len: self.count.saturating_add(self.offset % page_size).div_ceil(page_size),
        }
    }
}

impl PageSpan {
    /// Page numbers in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = usize> {
        self.first..self.first.saturating_add(self.len)
    }

    /// The same span, holding at most `max` pages.
    pub fn capped(self, max: usize) -> PageSpan {
        PageSpan {
            len: self.len.min(max),
            ..self
        }
    }
}
