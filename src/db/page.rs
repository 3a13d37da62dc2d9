use serde::Deserialize;

use crate::error::TrackerError;

/// `?page=N` as sent by the browser. Anything that is not an integer
/// falls back to the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn requested(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// A validated 1-based page number plus the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Pages below 1 do not exist.
    pub fn new(page: i64, per_page: u32) -> Result<Self, TrackerError> {
        if page < 1 || per_page == 0 {
            return Err(TrackerError::NotFound);
        }
        let page = u32::try_from(page).map_err(|_| TrackerError::NotFound)?;
        Ok(Self { page, per_page })
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Assemble a fetched page. An empty page past the first one is out of range.
    pub fn new(items: Vec<T>, req: PageRequest, total: u64) -> Result<Self, TrackerError> {
        if items.is_empty() && req.page != 1 {
            return Err(TrackerError::NotFound);
        }
        Ok(Self {
            items,
            page: req.page,
            per_page: req.per_page,
            total,
        })
    }

    pub fn pages(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page)) as u32
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub fn prev_num(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next_num(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}
