//! Field length bounds shared by the write DTOs and the schema.
//!
//! The VARCHAR widths in `db/migrations` must stay in sync with these.

/// Maximum length of a shop name.
pub const SHOP_NAME_MAX_LEN: u64 = 255;

/// Maximum length of an article title.
pub const ARTICLE_TITLE_MAX_LEN: u64 = 255;

/// Maximum length of an article comment.
pub const ARTICLE_COMMENT_MAX_LEN: u64 = 2048;
