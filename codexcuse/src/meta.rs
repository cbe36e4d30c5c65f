//! Pagination arithmetic.

use crate::model::Meta;

/// Default number of excuses per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

impl Meta {
    /// Computes pagination metadata for `requested_page` (1-based) over
    /// `total_count` items split into pages of `page_size`.
    ///
    /// `next_page` is set only while `current_page < total_pages`, and
    /// `prev_page` only when `current_page > 1`. An out-of-range page still
    /// yields consistent metadata; the caller just gets no items. A
    /// `page_size` of zero is treated as one.
    pub fn compute(total_count: u64, page_size: u64, requested_page: u64) -> Meta {
        let total_pages = total_count.div_ceil(page_size.max(1));
        let next_page = (requested_page < total_pages).then(|| requested_page + 1);
        let prev_page = (requested_page > 1).then(|| requested_page - 1);
        Meta {
            current_page: requested_page,
            prev_page,
            next_page,
            total_pages,
            total_count,
        }
    }

    /// Inclusive rank range `[skip, skip + page_size - 1]` covering `page`.
    ///
    /// Returns `None` when the range cannot be expressed as backend ranks,
    /// which only happens for absurdly large pages that are empty anyway.
    pub fn page_range(page: u64, page_size: u64) -> Option<(isize, isize)> {
        let page_size = page_size.max(1);
        let skip = page.saturating_sub(1).checked_mul(page_size)?;
        let stop = skip.checked_add(page_size - 1)?;
        Some((isize::try_from(skip).ok()?, isize::try_from(stop).ok()?))
    }
}
