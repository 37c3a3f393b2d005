pub mod articles;
pub mod shops;

/// Maximum page size for collection listings.
pub(crate) const MAX_LIMIT: i64 = 100;

/// Default page size for collection listings.
pub(crate) const DEFAULT_LIMIT: i64 = 50;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
