//! Offset/limit helpers shared by catalog listings and the pipeline query.

/// Default page size for catalog listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Upper bound for catalog page sizes.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Slice `items` by an optional offset and limit, keeping order.
///
/// A missing offset starts at the first item and a missing limit runs to the
/// end, so passing neither returns `items` unchanged. Negative values are
/// treated as zero.
pub fn slice_page<T>(items: Vec<T>, limit: Option<i64>, offset: Option<i64>) -> Vec<T> {
    let skip = usize::try_from(clamp_offset(offset)).unwrap_or(usize::MAX);
    let take = match limit {
        Some(limit) => usize::try_from(limit.max(0)).unwrap_or(usize::MAX),
        None => usize::MAX,
    };
    items.into_iter().skip(skip).take(take).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(200), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(clamp_offset(Some(7)), 7);
    }

    #[test]
    fn slice_page_without_bounds_returns_everything() {
        assert_eq!(slice_page(vec![1, 2, 3], None, None), vec![1, 2, 3]);
    }

    #[test]
    fn slice_page_takes_window_in_order() {
        assert_eq!(slice_page(vec![0, 1, 2, 3, 4], Some(2), Some(1)), vec![1, 2]);
    }

    #[test]
    fn slice_page_offset_only_runs_to_end() {
        assert_eq!(slice_page(vec![0, 1, 2, 3], None, Some(2)), vec![2, 3]);
    }

    #[test]
    fn slice_page_past_end_is_empty() {
        assert!(slice_page(vec![0, 1], Some(5), Some(10)).is_empty());
    }
}
