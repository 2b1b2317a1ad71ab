use crate::error::{AppError, AppResult};

/// Largest window the pager will lay out; one link is built per page in it.
pub const MAX_PAGE_LENGTH: u32 = 99;

/// Number of pages needed for `total_items` at `limit` per page. Never below 1,
/// so an empty result set still has a (single, empty) page.
pub fn page_count(total_items: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total_items.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pick the limit to use for a request: the requested one when it is offered,
/// otherwise the configured default.
pub fn effective_limit(requested: Option<u32>, options: &[u32], default_limit: u32) -> u32 {
    match requested {
        Some(l) if options.contains(&l) => l,
        Some(l) => {
            tracing::debug!(limit = l, "requested limit not offered; using default");
            default_limit
        }
        None => default_limit,
    }
}

pub fn validate_limit_options(options: &[u32]) -> AppResult<()> {
    if options.is_empty() {
        return Err(AppError::InvalidDescriptor("limitOptions is empty".into()));
    }
    if options.contains(&0) {
        return Err(AppError::InvalidDescriptor(
            "limitOptions must be positive".into(),
        ));
    }
    Ok(())
}
