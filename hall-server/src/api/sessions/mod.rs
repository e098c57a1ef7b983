//! Table Session API 模块
//!
//! 场次生命周期的 HTTP 入口，全部业务逻辑在 [`crate::sessions::SessionEngine`]。

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sessions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/open", post(handler::open))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/close", post(handler::close))
        .route("/{id}/pause", post(handler::pause))
        .route("/{id}/resume", post(handler::resume))
        .route("/{id}/transfer", post(handler::transfer))
        .route("/{id}/apply-promotion", post(handler::apply_promotion))
        .route("/table/{table_id}/active", get(handler::active_for_table))
}
