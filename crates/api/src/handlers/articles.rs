//! Handlers for the `/articles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use listou_core::error::CoreError;
use listou_core::types::DbId;
use listou_db::models::article::{CreateArticle, UpdateArticle};
use listou_db::repositories::{ArticleRepo, ShopRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{clamp_limit, clamp_offset};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /articles`.
#[derive(Debug, Deserialize)]
pub struct ListArticlesParams {
    /// Exact shop id filter.
    pub shop: Option<DbId>,
    /// Bought flag filter.
    pub bought: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Return 404 unless the referenced shop exists.
async fn ensure_shop_exists(pool: &sqlx::PgPool, shop_id: DbId) -> AppResult<()> {
    if ShopRepo::find_by_id(pool, shop_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Shop",
            id: shop_id,
        }));
    }
    Ok(())
}

/// GET /api/v1/articles
///
/// List articles as read views ordered by title ascending, with optional
/// exact-shop and bought filters. Elements have the same shape as the item
/// view.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let articles =
        ArticleRepo::list(&state.pool, params.shop, params.bought, limit, offset).await?;

    Ok(Json(DataResponse { data: articles }))
}

/// POST /api/v1/articles
///
/// Create an article (`bought=false`, `archived=false`, `created_at=now`
/// unless stated otherwise). Returns the read view with 201 Created.
pub async fn create_article(
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if let Some(shop_id) = input.shop {
        ensure_shop_exists(&state.pool, shop_id).await?;
    }

    let article = ArticleRepo::create(&state.pool, &input).await?;
    let read = ArticleRepo::find_read(&state.pool, article.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Article",
            id: article.id,
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: read })))
}

/// GET /api/v1/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let read = ArticleRepo::find_read(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Article",
            id,
        })?;

    Ok(Json(DataResponse { data: read }))
}

/// PUT /api/v1/articles/{id}
///
/// Partial update. Nullable fields distinguish absent (unchanged) from
/// `null` (cleared); changed string fields are re-validated; `created_at`
/// never changes.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if let Some(Some(shop_id)) = input.shop {
        ensure_shop_exists(&state.pool, shop_id).await?;
    }

    let updated = ArticleRepo::update(&state.pool, id, &input).await?;
    if updated.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }));
    }

    let read = ArticleRepo::find_read(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Article",
            id,
        })?;

    Ok(Json(DataResponse { data: read }))
}

/// DELETE /api/v1/articles/{id}
///
/// Returns 204 No Content.
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ArticleRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
