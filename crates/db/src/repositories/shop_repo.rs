//! Repository for the `shops` table.
//!
//! Also applies the shop ↔ article association delta: every write that
//! touches a shop's article list runs in one transaction so no row is left
//! with a dangling one-sided reference.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool, Postgres, Transaction};

use listou_core::association::{diff_articles, AssociationDelta};
use listou_core::types::{DbId, Timestamp};

use crate::models::article::ArticleInShop;
use crate::models::shop::{CreateShop, Shop, ShopRead, ShopSummary, UpdateShop};

/// Column list for shops queries.
const COLUMNS: &str = "id, name";

/// Columns of the article projection embedded in a shop's read view.
const ARTICLE_COLUMNS: &str =
    "id, title, comment, bought, archived, created_at, bought_at, image_id AS image";

/// Article projection paired with its owning shop id, for batched
/// collection fetches.
#[derive(FromRow)]
struct OwnedArticleRow {
    shop_id: DbId,
    id: DbId,
    title: String,
    comment: Option<String>,
    bought: bool,
    archived: bool,
    created_at: Timestamp,
    bought_at: Option<Timestamp>,
    image: Option<DbId>,
}

impl From<OwnedArticleRow> for ArticleInShop {
    fn from(row: OwnedArticleRow) -> Self {
        ArticleInShop {
            id: row.id,
            title: row.title,
            comment: row.comment,
            bought: row.bought,
            archived: row.archived,
            created_at: row.created_at,
            bought_at: row.bought_at,
            image: row.image,
        }
    }
}

/// Provides CRUD operations for shops.
pub struct ShopRepo;

impl ShopRepo {
    /// Create a new shop, attaching any requested articles in the same
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateShop) -> Result<Shop, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO shops (name) VALUES ($1) RETURNING {COLUMNS}");
        let shop = sqlx::query_as::<_, Shop>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(desired) = &input.articles {
            let delta = diff_articles(&[], desired);
            Self::apply_delta(&mut tx, shop.id, &delta).await?;
        }

        tx.commit().await?;
        Ok(shop)
    }

    /// Find a shop row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shops WHERE id = $1");
        sqlx::query_as::<_, Shop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Assemble the read view: the shop row plus its derived article
    /// collection ordered by title ascending.
    pub async fn find_read(pool: &PgPool, id: DbId) -> Result<Option<ShopRead>, sqlx::Error> {
        let Some(shop) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let articles = Self::list_articles(pool, id).await?;
        Ok(Some(ShopRead {
            id: shop.id,
            name: shop.name,
            articles,
        }))
    }

    /// The `{id, name}` summary embedded in article read views.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShopSummary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shops WHERE id = $1");
        sqlx::query_as::<_, ShopSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List shops as read views ordered by name ascending. The derived
    /// article collections for the whole page are fetched in one batched
    /// query, each collection title ascending.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShopRead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shops
             ORDER BY name ASC
             LIMIT $1 OFFSET $2"
        );
        let shops = sqlx::query_as::<_, Shop>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = shops.iter().map(|s| s.id).collect();
        let query = format!(
            "SELECT shop_id, {ARTICLE_COLUMNS} FROM articles
             WHERE shop_id = ANY($1)
             ORDER BY title ASC"
        );
        let rows = sqlx::query_as::<_, OwnedArticleRow>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_shop: HashMap<DbId, Vec<ArticleInShop>> = HashMap::new();
        for row in rows {
            by_shop.entry(row.shop_id).or_default().push(row.into());
        }

        Ok(shops
            .into_iter()
            .map(|shop| {
                let articles = by_shop.remove(&shop.id).unwrap_or_default();
                ShopRead {
                    id: shop.id,
                    name: shop.name,
                    articles,
                }
            })
            .collect())
    }

    /// Articles attached to a shop, projected for embedding, title ascending.
    pub async fn list_articles(
        pool: &PgPool,
        shop_id: DbId,
    ) -> Result<Vec<ArticleInShop>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles
             WHERE shop_id = $1
             ORDER BY title ASC"
        );
        sqlx::query_as::<_, ArticleInShop>(&query)
            .bind(shop_id)
            .fetch_all(pool)
            .await
    }

    /// Update a shop's name and/or replace its attached article set.
    ///
    /// Returns `Ok(None)` if the shop does not exist. The association delta
    /// and the name change commit or roll back together.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShop,
    ) -> Result<Option<Shop>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE shops SET name = COALESCE($1, name)
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        let Some(shop) = sqlx::query_as::<_, Shop>(&query)
            .bind(&input.name)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(desired) = &input.articles {
            let current: Vec<DbId> =
                sqlx::query_scalar("SELECT id FROM articles WHERE shop_id = $1 ORDER BY id")
                    .bind(id)
                    .fetch_all(&mut *tx)
                    .await?;
            let delta = diff_articles(&current, desired);
            Self::apply_delta(&mut tx, id, &delta).await?;
        }

        tx.commit().await?;
        Ok(Some(shop))
    }

    /// Delete a shop.
    ///
    /// The foreign key on `articles.shop_id` has no ON DELETE action, so a
    /// shop that still has attached articles fails with a foreign-key
    /// violation, which the API surfaces as a conflict.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply an attach/detach delta to the owning side of the association.
    ///
    /// Attaching an unknown article id yields `RowNotFound`. The detach is
    /// guarded (`AND shop_id = $shop`) so an article concurrently reassigned
    /// to another shop keeps its new owner.
    async fn apply_delta(
        tx: &mut Transaction<'_, Postgres>,
        shop_id: DbId,
        delta: &AssociationDelta,
    ) -> Result<(), sqlx::Error> {
        tracing::debug!(
            shop_id,
            attach = delta.attach.len(),
            detach = delta.detach.len(),
            "Applying association delta"
        );

        if !delta.attach.is_empty() {
            let updated = sqlx::query("UPDATE articles SET shop_id = $1 WHERE id = ANY($2)")
                .bind(shop_id)
                .bind(&delta.attach)
                .execute(&mut **tx)
                .await?
                .rows_affected();
            if updated != delta.attach.len() as u64 {
                return Err(sqlx::Error::RowNotFound);
            }
        }

        if !delta.detach.is_empty() {
            sqlx::query("UPDATE articles SET shop_id = NULL WHERE id = ANY($1) AND shop_id = $2")
                .bind(&delta.detach)
                .bind(shop_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
