//! REST adapter for calorizer.
//!
//! This crate exposes the client record services over HTTP with axum. The
//! request language comes from [`language::RequestLanguage`]; mutating
//! endpoints answer with the response envelope and an HTTP status mirroring
//! its `statusCode`.

pub mod extract;
pub mod language;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use calorizer_core::{
    BiochemicalMedicalTest, Calorizer, DrugsSupplement, MedicalHistory, WeightHistory,
};
use tower_http::cors::CorsLayer;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub core: Calorizer,
}

impl AppState {
    pub fn new(core: Calorizer) -> Self {
        Self { core }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/language", get(language::set_language))
        .route(
            "/clients",
            get(routes::list_clients).post(routes::create_client),
        )
        .route(
            "/clients/:id",
            get(routes::get_client)
                .put(routes::update_client)
                .delete(routes::delete_client),
        )
        .route("/clients/:id/details", get(routes::client_details))
        .route(
            "/weight-histories",
            get(routes::list_records::<WeightHistory>).post(routes::add_record::<WeightHistory>),
        )
        .route(
            "/weight-histories/:id",
            delete(routes::delete_record::<WeightHistory>),
        )
        .route(
            "/biochemical-tests",
            get(routes::list_records::<BiochemicalMedicalTest>)
                .post(routes::add_record::<BiochemicalMedicalTest>),
        )
        .route(
            "/biochemical-tests/:id",
            delete(routes::delete_record::<BiochemicalMedicalTest>),
        )
        .route(
            "/drugs-supplements",
            get(routes::list_records::<DrugsSupplement>)
                .post(routes::add_record::<DrugsSupplement>),
        )
        .route(
            "/drugs-supplements/:id",
            delete(routes::delete_record::<DrugsSupplement>),
        )
        .route(
            "/medical-histories",
            get(routes::list_records::<MedicalHistory>)
                .post(routes::add_record::<MedicalHistory>),
        )
        .route(
            "/medical-histories/:id",
            delete(routes::delete_record::<MedicalHistory>),
        )
        .route("/lookups/genders", get(routes::genders))
        .route("/lookups/:id", get(routes::lookup_by_id))
        .route("/translations", get(routes::translations))
        .route("/translations/reload", post(routes::reload_translations))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
