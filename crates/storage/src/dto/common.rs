use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!("page_size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        if self.checked_offset().is_none() {
            return Err("page is out of range".to_string());
        }
        Ok(())
    }

    fn checked_offset(&self) -> Option<u32> {
        self.page.checked_sub(1)?.checked_mul(self.page_size)
    }

    /// Rows to skip; saturates for parameters `validate` rejects.
    pub fn offset(&self) -> u32 {
        self.checked_offset().unwrap_or(u32::MAX)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            (total_items.max(0) as u64).div_ceil(u64::from(page_size)) as u32
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: PaginationParams, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params.page, params.page_size, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        let ok = PaginationParams { page: 2, page_size: 100 };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.offset(), 100);

        let too_big = PaginationParams { page: 1, page_size: 101 };
        assert!(too_big.validate().is_err());

        let zero_page = PaginationParams { page: 0, page_size: 10 };
        assert!(zero_page.validate().is_err());
    }

    #[test]
    fn test_page_past_offset_range_is_rejected() {
        let huge = PaginationParams { page: 50_000_000, page_size: 100 };
        assert!(huge.validate().is_err());
        assert_eq!(huge.offset(), u32::MAX);

        let last = PaginationParams { page: u32::MAX / 100 + 1, page_size: 100 };
        assert!(last.validate().is_ok());
        assert_eq!(last.offset(), u32::MAX / 100 * 100);

        let zero = PaginationParams { page: 0, page_size: 10 };
        assert_eq!(zero.offset(), u32::MAX);
    }

    #[test]
    fn test_total_pages_round_up() {
        assert_eq!(PaginationMeta::new(1, 20, 41).total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 20, 40).total_pages, 2);
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
    }
}
