use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, Uri},
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{auth, files, password, users, v2};

/// Full HTTP surface of the directory.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/time", get(time))
        .route("/v1/add", post(users::add))
        .route("/v1/user/{id}", delete(users::delete))
        .route("/v1/getall", get(users::get_all))
        .route("/v1/getid", get(users::get_id))
        .route("/v1/username/{id}", get(users::get_user_data))
        .route("/v1/update", put(users::update))
        .route("/v1/login", post(auth::login))
        .route("/v1/logout", post(auth::logout))
        .route("/v1/logged", get(auth::logged_users))
        .route("/v1/password/{length}", get(password::generate))
        .route("/v2/add", post(v2::add))
        .route("/v2/login", post(v2::login))
        .route("/v2/logout", post(v2::logout))
        .route("/v2/getall", get(v2::get_all))
        .route(
            "/v2/files/{filename}",
            put(files::upload_file).layer(DefaultBodyLimit::max(files::MAX_FILE_SIZE)),
        )
        .fallback(not_supported)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /v1/time
async fn time() -> String {
    let now = chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S UTC");
    format!("The current time is: {now}\n")
}

async fn not_supported(uri: Uri) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("{} is not supported. Thanks for visiting!\n", uri.path()),
    )
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Method not allowed!\n")
}
