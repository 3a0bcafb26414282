use axum::{routing::get, Router};

use crate::state::AppState;

pub mod download;
pub mod pages;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/secrets", get(pages::secrets))
        .route("/download", get(download::download))
}
