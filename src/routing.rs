//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    price_check::{
        change_category, get_item_field, get_location_field, get_price_check_page,
        submit_price_check,
    },
    suggestion::{get_item_suggestions, get_location_suggestions},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_price_check_page))
        .route(endpoints::PRICE_CHECK, post(submit_price_check))
        .route(
            endpoints::LOCATION_SUGGESTIONS,
            get(get_location_suggestions),
        )
        .route(endpoints::ITEM_SUGGESTIONS, get(get_item_suggestions))
        .route(endpoints::LOCATION_FIELD, get(get_location_field))
        .route(endpoints::ITEM_FIELD, get(get_item_field))
        .route(endpoints::CATEGORY_CHANGE, get(change_category))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
