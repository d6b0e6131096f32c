//! `/filme`, `/cinema` and `/endereco` CRUD routes.

use crate::handlers::{cinema, endereco, filme};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/filme", get(filme::list).post(filme::create))
        .route(
            "/filme/:id",
            get(filme::read)
                .put(filme::update)
                .patch(filme::patch)
                .delete(filme::delete),
        )
        .route("/cinema", get(cinema::list).post(cinema::create))
        .route(
            "/cinema/:id",
            get(cinema::read)
                .put(cinema::update)
                .patch(cinema::patch)
                .delete(cinema::delete),
        )
        .route("/endereco", get(endereco::list).post(endereco::create))
        .route(
            "/endereco/:id",
            get(endereco::read)
                .put(endereco::update)
                .patch(endereco::patch)
                .delete(endereco::delete),
        )
}
