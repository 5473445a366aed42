use axum::{routing::get, Router};
use std::sync::Arc;

use super::{handlers, AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::post_list))
        .route("/posts/new", get(handlers::post_new_form).post(handlers::post_create))
        .route("/posts/:id", get(handlers::post_detail))
        .route(
            "/posts/:id/edit",
            get(handlers::post_edit_form).post(handlers::post_update),
        )
        .route(
            "/posts/:id/delete",
            get(handlers::post_delete_confirm).post(handlers::post_delete),
        )
        .route("/posts/:id/publish", get(handlers::post_publish))
        .route(
            "/posts/:id/comment",
            get(handlers::comment_form).post(handlers::comment_add),
        )
        .route("/comments/:id/approve", get(handlers::comment_approve))
        .route("/comments/:id/remove", get(handlers::comment_remove))
        .route("/drafts", get(handlers::draft_list))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", get(handlers::logout))
        .route("/health", get(handlers::health))
}
