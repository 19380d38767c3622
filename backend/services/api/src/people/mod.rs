pub mod handlers;
pub mod requests;
pub mod responses;
pub mod service;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/person",
            get(handlers::list_people).post(handlers::create_person),
        )
        .route(
            "/person/{id}",
            get(handlers::get_person)
                .put(handlers::update_person)
                .delete(handlers::delete_person),
        )
}
