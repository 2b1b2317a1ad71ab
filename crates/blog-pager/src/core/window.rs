//! Page-window arithmetic.

use super::{
    limits::{validate_limit_options, MAX_PAGE_LENGTH},
    types::{PageWindow, PagingDescriptor},
};
use crate::error::{AppError, AppResult};

impl PagingDescriptor {
    /// Reject descriptors the window algorithm cannot work with and pull
    /// out-of-range pages back into `[1, page_count]`.
    pub fn normalize(mut self) -> AppResult<Self> {
        if self.page_length == 0 || self.page_length % 2 == 0 {
            return Err(AppError::InvalidDescriptor(format!(
                "pageLength must be odd and positive, got {}",
                self.page_length
            )));
        }
        if self.page_length > MAX_PAGE_LENGTH {
            return Err(AppError::InvalidDescriptor(format!(
                "pageLength must be at most {MAX_PAGE_LENGTH}, got {}",
                self.page_length
            )));
        }
        if self.current_limit == 0 {
            return Err(AppError::InvalidDescriptor("currentLimit must be positive".into()));
        }
        validate_limit_options(&self.limit_options)?;

        let page_count = self.page_count.max(1);
        let current_page = self.current_page.clamp(1, page_count);
        if current_page != self.current_page || page_count != self.page_count {
            tracing::debug!(
                current_page = self.current_page,
                page_count = self.page_count,
                clamped_to = current_page,
                "clamped paging descriptor"
            );
        }
        self.page_count = page_count;
        self.current_page = current_page;
        Ok(self)
    }
}

/// Window of page numbers centred on the current page where possible.
///
/// Expects a normalized descriptor.
pub fn page_window(d: &PagingDescriptor) -> PageWindow {
    let page_buffer = d.page_length / 2;
    let reach = d.current_page.saturating_add(page_buffer);
    let page_end = if reach < d.page_count {
        reach.max(d.page_count.min(d.page_length))
    } else {
        d.page_count
    };
    let page_start = if page_end > d.page_length {
        page_end - d.page_length + 1
    } else {
        1
    };
    PageWindow {
        page_start,
        page_end,
    }
}
