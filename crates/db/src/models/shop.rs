//! Shop row, projections, and write DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use listou_core::limits::SHOP_NAME_MAX_LEN;
use listou_core::types::DbId;
use listou_core::validation::non_blank;

use crate::models::article::ArticleInShop;

/// A row from the `shops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shop {
    pub id: DbId,
    pub name: String,
}

/// Read view of a shop: the row fields plus the derived article collection,
/// ordered by title ascending. Embedded articles omit their shop so the
/// mutual expansion terminates.
#[derive(Debug, Serialize)]
pub struct ShopRead {
    pub id: DbId,
    pub name: String,
    pub articles: Vec<ArticleInShop>,
}

/// Reduced `{id, name}` projection embedded in an article's read view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShopSummary {
    pub id: DbId,
    pub name: String,
}

/// Write view for creating a shop.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShop {
    #[validate(
        custom(function = non_blank),
        length(max = SHOP_NAME_MAX_LEN, message = "must be at most 255 characters")
    )]
    pub name: String,
    /// Existing article ids to attach in the same transaction.
    #[serde(default)]
    pub articles: Option<Vec<DbId>>,
}

/// Write view for updating a shop. Absent fields are left unchanged; a
/// present `articles` list fully replaces the shop's attached set.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateShop {
    #[validate(
        custom(function = non_blank),
        length(max = SHOP_NAME_MAX_LEN, message = "must be at most 255 characters")
    )]
    pub name: Option<String>,
    pub articles: Option<Vec<DbId>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use listou_core::validation::violations_from;

    #[test]
    fn create_shop_accepts_valid_name() {
        let input = CreateShop {
            name: "Corner Store".into(),
            articles: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_shop_rejects_blank_name() {
        let input = CreateShop {
            name: "   ".into(),
            articles: None,
        };
        let errors = input.validate().unwrap_err();
        let violations = violations_from(&errors);
        assert_eq!(violations.0[0].field, "name");
        assert_eq!(violations.0[0].message, "must not be blank");
    }

    #[test]
    fn create_shop_rejects_overlong_name() {
        let input = CreateShop {
            name: "x".repeat(256),
            articles: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_shop_accepts_name_at_limit() {
        let input = CreateShop {
            name: "x".repeat(255),
            articles: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_shop_skips_absent_name() {
        let input = UpdateShop {
            name: None,
            articles: Some(vec![1, 2]),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_shop_validates_present_name() {
        let input = UpdateShop {
            name: Some(String::new()),
            articles: None,
        };
        assert!(input.validate().is_err());
    }
}
