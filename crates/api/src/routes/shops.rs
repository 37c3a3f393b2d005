//! Route definitions for the shop resource.
//!
//! Registered under `/shops`.

use axum::routing::get;
use axum::Router;

use crate::handlers::shops;
use crate::state::AppState;

/// Shop routes, registered as `/shops`.
///
/// ```text
/// GET    /        list_shops
/// POST   /        create_shop
/// GET    /{id}    get_shop
/// PUT    /{id}    update_shop
/// DELETE /{id}    delete_shop
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shops::list_shops).post(shops::create_shop))
        .route(
            "/{id}",
            get(shops::get_shop)
                .put(shops::update_shop)
                .delete(shops::delete_shop),
        )
}
