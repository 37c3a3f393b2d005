//! Repository for the `articles` table.

use sqlx::{FromRow, PgPool};

use listou_core::types::{DbId, Timestamp};

use crate::models::article::{Article, ArticleRead, CreateArticle, UpdateArticle};
use crate::models::shop::ShopSummary;
use crate::repositories::shop_repo::ShopRepo;

/// Column list for articles queries.
const COLUMNS: &str =
    "id, title, comment, bought, archived, created_at, bought_at, shop_id, image_id";

/// Article row joined with its owning shop, backing the list view.
#[derive(FromRow)]
struct ArticleListRow {
    id: DbId,
    title: String,
    comment: Option<String>,
    bought: bool,
    archived: bool,
    created_at: Timestamp,
    bought_at: Option<Timestamp>,
    image: Option<DbId>,
    shop_id: Option<DbId>,
    shop_name: Option<String>,
}

impl From<ArticleListRow> for ArticleRead {
    fn from(row: ArticleListRow) -> Self {
        let shop = match (row.shop_id, row.shop_name) {
            (Some(id), Some(name)) => Some(ShopSummary { id, name }),
            _ => None,
        };
        ArticleRead {
            id: row.id,
            title: row.title,
            comment: row.comment,
            bought: row.bought,
            archived: row.archived,
            created_at: row.created_at,
            bought_at: row.bought_at,
            shop,
            image: row.image,
        }
    }
}

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Create a new article. `bought` and `archived` default to false and
    /// `created_at` is assigned by the insert default, never by the caller.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles
                (title, comment, bought, archived, bought_at, shop_id, image_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.comment)
            .bind(input.bought.unwrap_or(false))
            .bind(input.archived.unwrap_or(false))
            .bind(input.bought_at)
            .bind(input.shop)
            .bind(input.image)
            .fetch_one(pool)
            .await
    }

    /// Find an article row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Assemble the read view: the article row with its shop embedded as an
    /// `{id, name}` summary.
    pub async fn find_read(pool: &PgPool, id: DbId) -> Result<Option<ArticleRead>, sqlx::Error> {
        let Some(article) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let shop = match article.shop_id {
            Some(shop_id) => ShopRepo::find_summary(pool, shop_id).await?,
            None => None,
        };
        Ok(Some(ArticleRead::from_parts(article, shop)))
    }

    /// List articles as read views ordered by title ascending, with optional
    /// exact-shop and bought filters. The owning shop is joined in so list
    /// elements carry the same `{id, name}` summary as the item view.
    pub async fn list(
        pool: &PgPool,
        shop: Option<DbId>,
        bought: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleRead>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ArticleListRow>(
            "SELECT a.id, a.title, a.comment, a.bought, a.archived,
                    a.created_at, a.bought_at, a.image_id AS image,
                    a.shop_id, s.name AS shop_name
             FROM articles a
             LEFT JOIN shops s ON s.id = a.shop_id
             WHERE ($1::BIGINT IS NULL OR a.shop_id = $1)
               AND ($2::BOOL IS NULL OR a.bought = $2)
             ORDER BY a.title ASC
             LIMIT $3 OFFSET $4",
        )
        .bind(shop)
        .bind(bought)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(ArticleRead::from).collect())
    }

    /// Partially update an article. Absent fields keep their value; nullable
    /// fields with an explicit `null` are cleared. `created_at` is never
    /// touched. Returns `Ok(None)` if the article does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($1, title),
                comment = CASE WHEN $2 THEN $3 ELSE comment END,
                bought = COALESCE($4, bought),
                archived = COALESCE($5, archived),
                bought_at = CASE WHEN $6 THEN $7 ELSE bought_at END,
                shop_id = CASE WHEN $8 THEN $9 ELSE shop_id END,
                image_id = CASE WHEN $10 THEN $11 ELSE image_id END
             WHERE id = $12
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(input.comment.is_some())
            .bind(input.comment.clone().flatten())
            .bind(input.bought)
            .bind(input.archived)
            .bind(input.bought_at.is_some())
            .bind(input.bought_at.flatten())
            .bind(input.shop.is_some())
            .bind(input.shop.flatten())
            .bind(input.image.is_some())
            .bind(input.image.flatten())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by id. Any shop read view stops listing it because
    /// the collection is derived from `shop_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
