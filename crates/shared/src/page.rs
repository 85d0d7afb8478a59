/// Page-number pagination arguments, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    pub page: u64,
    pub limit: u64,
}

impl PageArgs {
    /// Hard ceiling on rows per page. Keeps `IN (..)` lists built from a page
    /// well below SQLite's bound variable limit.
    pub const MAX_LIMIT: u64 = 1000;

    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Saturates instead of overflowing, so an absurd page number lands past
    /// the end and is rejected by `ensure_within`.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// The first page always exists, even when empty.
    pub fn ensure_within(&self, count: u64) -> crate::Result<()> {
        if self.page > 1 && self.offset() >= count {
            return Err(crate::Error::InvalidPage);
        }

        Ok(())
    }
}

impl Default for PageArgs {
    fn default() -> Self {
        Self::new(1, 6)
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub args: PageArgs,
    pub count: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.args.offset().saturating_add(self.results.len() as u64) < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.args.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            args: self.args,
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
