pub mod articles;
pub mod health;
pub mod shops;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /shops                list, create
/// /shops/{id}           get, update, delete
///
/// /articles             list (filter: shop, bought), create
/// /articles/{id}        get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/shops", shops::router())
        .nest("/articles", articles::router())
}
