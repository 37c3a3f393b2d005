//! Handlers for the `/shops` resource.
//!
//! Write bodies are validated before any persistence; association changes
//! are applied transactionally by the repository.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use listou_core::error::CoreError;
use listou_core::types::DbId;
use listou_db::models::shop::{CreateShop, UpdateShop};
use listou_db::repositories::ShopRepo;

use crate::error::{is_foreign_key_violation, AppError, AppResult};
use crate::handlers::{clamp_limit, clamp_offset};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /shops`.
#[derive(Debug, Deserialize)]
pub struct ListShopsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/shops
///
/// List shops as read views (embedded article collections, title ascending)
/// ordered by name ascending.
pub async fn list_shops(
    State(state): State<AppState>,
    Query(params): Query<ListShopsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let shops = ShopRepo::list(&state.pool, limit, offset).await?;

    Ok(Json(DataResponse { data: shops }))
}

/// POST /api/v1/shops
///
/// Create a shop, optionally attaching existing articles by id. Returns the
/// read view (embedded articles, title ascending) with 201 Created.
pub async fn create_shop(
    State(state): State<AppState>,
    Json(input): Json<CreateShop>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let shop = ShopRepo::create(&state.pool, &input).await?;
    let read = ShopRepo::find_read(&state.pool, shop.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shop",
            id: shop.id,
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: read })))
}

/// GET /api/v1/shops/{id}
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let read = ShopRepo::find_read(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shop",
            id,
        })?;

    Ok(Json(DataResponse { data: read }))
}

/// PUT /api/v1/shops/{id}
///
/// Partial update of `name` and/or full replacement of the attached article
/// list. Returns the updated read view.
pub async fn update_shop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateShop>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let updated = ShopRepo::update(&state.pool, id, &input).await?;
    if updated.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Shop",
            id,
        }));
    }

    let read = ShopRepo::find_read(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shop",
            id,
        })?;

    Ok(Json(DataResponse { data: read }))
}

/// DELETE /api/v1/shops/{id}
///
/// Returns 204 No Content. Deleting a shop that still has attached articles
/// fails with 409 CONFLICT (restrict policy); detach the articles first.
pub async fn delete_shop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ShopRepo::delete(&state.pool, id).await.map_err(|err| {
        if is_foreign_key_violation(&err) {
            AppError::Core(CoreError::Conflict(format!(
                "Shop {id} still has attached articles"
            )))
        } else {
            AppError::Database(err)
        }
    })?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Shop",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
