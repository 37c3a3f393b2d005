//! Article row, projections, and write DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use listou_core::limits::{ARTICLE_COMMENT_MAX_LEN, ARTICLE_TITLE_MAX_LEN};
use listou_core::types::{DbId, Timestamp};
use listou_core::validation::non_blank;

use crate::models::double_option;
use crate::models::shop::ShopSummary;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub comment: Option<String>,
    pub bought: bool,
    pub archived: bool,
    pub created_at: Timestamp,
    pub bought_at: Option<Timestamp>,
    pub shop_id: Option<DbId>,
    pub image_id: Option<DbId>,
}

/// Read view of an article: the owning shop appears as a reduced
/// `{id, name}` summary instead of a full shop representation.
#[derive(Debug, Serialize)]
pub struct ArticleRead {
    pub id: DbId,
    pub title: String,
    pub comment: Option<String>,
    pub bought: bool,
    pub archived: bool,
    pub created_at: Timestamp,
    pub bought_at: Option<Timestamp>,
    pub shop: Option<ShopSummary>,
    pub image: Option<DbId>,
}

impl ArticleRead {
    pub fn from_parts(article: Article, shop: Option<ShopSummary>) -> Self {
        Self {
            id: article.id,
            title: article.title,
            comment: article.comment,
            bought: article.bought,
            archived: article.archived,
            created_at: article.created_at,
            bought_at: article.bought_at,
            shop,
            image: article.image_id,
        }
    }
}

/// Article projection embedded in a shop's read view; the shop itself is
/// omitted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleInShop {
    pub id: DbId,
    pub title: String,
    pub comment: Option<String>,
    pub bought: bool,
    pub archived: bool,
    pub created_at: Timestamp,
    pub bought_at: Option<Timestamp>,
    pub image: Option<DbId>,
}

/// Write view for creating an article.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(
        custom(function = non_blank),
        length(max = ARTICLE_TITLE_MAX_LEN, message = "must be at most 255 characters")
    )]
    pub title: String,
    #[validate(length(max = ARTICLE_COMMENT_MAX_LEN, message = "must be at most 2048 characters"))]
    pub comment: Option<String>,
    #[serde(default)]
    pub bought: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub bought_at: Option<Timestamp>,
    /// Owning shop id.
    #[serde(default)]
    pub shop: Option<DbId>,
    /// Externally managed media object id.
    #[serde(default)]
    pub image: Option<DbId>,
}

/// Write view for updating an article.
///
/// Nullable fields use the double-`Option` pattern: absent leaves the column
/// unchanged, an explicit `null` clears it. `created_at` is not writable.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateArticle {
    #[validate(
        custom(function = non_blank),
        length(max = ARTICLE_TITLE_MAX_LEN, message = "must be at most 255 characters")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = ARTICLE_COMMENT_MAX_LEN, message = "must be at most 2048 characters"))]
    pub comment: Option<Option<String>>,
    pub bought: Option<bool>,
    pub archived: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub bought_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "double_option")]
    pub shop: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<DbId>>,
}
