//! Payment API 模块

mod handler;

use axum::{Router, routing::delete, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/session/{session_id}", get(handler::list_by_session))
        .route("/{id}", delete(handler::delete))
}
