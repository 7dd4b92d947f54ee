use crate::handlers::{exec, files};
use crate::middleware::{auth, logging};
use crate::state::AppState;
use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(|| async { Redirect::to("/list") }))
        .route("/list", get(files::list_files))
        .route("/view", get(files::view_file))
        .route("/download", get(files::download_file))
        .route(
            "/upload",
            post(files::upload_file).layer(axum::extract::DefaultBodyLimit::disable()),
        )
        .route("/exec", get(exec::exec_page).post(exec::execute_command))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(middleware::from_fn(logging::logging_middleware))
        .with_state(state)
}
