//! REST routes for the three portfolio resources.
//!
//! Static segments (`/stats`, `/current`, `/degrees`) coexist with `/:id`;
//! the router prefers the static match.

use crate::handlers::{careers, study_experience, work_experience};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/careers", get(careers::list).post(careers::create))
        .route("/api/careers/stats", get(careers::stats))
        .route(
            "/api/careers/:id",
            get(careers::read)
                .put(careers::update)
                .delete(careers::delete),
        )
        .route(
            "/api/work-experience",
            get(work_experience::list).post(work_experience::create),
        )
        .route("/api/work-experience/stats", get(work_experience::stats))
        .route("/api/work-experience/current", get(work_experience::current))
        .route(
            "/api/work-experience/:id",
            get(work_experience::read)
                .put(work_experience::update)
                .delete(work_experience::delete),
        )
        .route(
            "/api/study-experience",
            get(study_experience::list).post(study_experience::create),
        )
        .route("/api/study-experience/stats", get(study_experience::stats))
        .route("/api/study-experience/current", get(study_experience::current))
        .route("/api/study-experience/degrees", get(study_experience::degrees))
        .route(
            "/api/study-experience/:id",
            get(study_experience::read)
                .put(study_experience::update)
                .delete(study_experience::delete),
        )
        .with_state(state)
}
