use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/record", post(handlers::record_today))
        .route("/api/today", get(handlers::get_today))
        .route("/api/records", get(handlers::list_records))
        .route(
            "/api/records/:date",
            get(handlers::get_record)
                .put(handlers::put_record)
                .delete(handlers::delete_record),
        )
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/settings", get(handlers::get_settings).put(handlers::put_settings))
        .route("/api/data", delete(handlers::clear_data))
        .with_state(state)
}
