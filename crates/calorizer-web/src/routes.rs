//! HTTP handlers.
//!
//! Mutating endpoints return the response envelope with an HTTP status equal
//! to its `statusCode`. Read endpoints return bare JSON.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use calorizer_core::{
    services::ClientRecord, Calorizer, CalorizerError, CalorizerResult, ClientDetails, ClientDto,
    LookupDto, LookupType, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::extract::{ClientScope, Form};
use crate::language::RequestLanguage;
use crate::AppState;

type ApiError = (StatusCode, &'static str);

/// Envelope with the matching HTTP status.
pub type Envelope<T> = (StatusCode, Json<Response<T>>);

fn envelope<T>(response: Response<T>) -> Envelope<T> {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

fn internal(e: CalorizerError) -> ApiError {
    tracing::error!("{e}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

/// Run store work on the blocking pool.
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Calorizer) -> CalorizerResult<T> + Send + 'static,
    T: Send + 'static,
{
    let core = state.core.clone();
    tokio::task::spawn_blocking(move || f(&core))
        .await
        .map_err(|e| {
            tracing::error!("blocking task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        })?
        .map_err(internal)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Health check.
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "calorizer is alive".into(),
    })
}

// ==================== Clients ====================

pub async fn list_clients(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> Result<Json<Vec<ClientDto>>, ApiError> {
    blocking(&state, move |core| {
        core.with_clients(lang, |clients| clients.all_clients())?
            .map_err(Into::into)
    })
    .await
    .map(Json)
}

pub async fn get_client(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Path(id): Path<i64>,
) -> Result<Json<ClientDto>, ApiError> {
    let client = blocking(&state, move |core| {
        core.with_clients(lang, |clients| clients.client_by_id(id))?
            .map_err(Into::into)
    })
    .await?;

    client
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Client not found"))
}

pub async fn client_details(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Path(id): Path<i64>,
) -> Result<Json<ClientDetails>, ApiError> {
    let details = blocking(&state, move |core| {
        core.with_clients(lang, |clients| clients.client_details(id))?
            .map_err(Into::into)
    })
    .await?;

    details
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Client not found"))
}

pub async fn create_client(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Form(form): Form<ClientDto>,
) -> Result<Envelope<ClientDto>, ApiError> {
    blocking(&state, move |core| {
        let user = core.acting_user_id();
        core.with_clients(lang, |clients| clients.create_client(&form, user))
    })
    .await
    .map(envelope)
}

pub async fn update_client(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Path(id): Path<i64>,
    Form(mut form): Form<ClientDto>,
) -> Result<Envelope<ClientDto>, ApiError> {
    form.id = id;
    blocking(&state, move |core| {
        let user = core.acting_user_id();
        core.with_clients(lang, |clients| clients.update_client(&form, user))
    })
    .await
    .map(envelope)
}

pub async fn delete_client(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Path(id): Path<i64>,
) -> Result<Envelope<Vec<ClientDto>>, ApiError> {
    blocking(&state, move |core| core.with_clients(lang, |clients| clients.delete_client(id)))
        .await
        .map(envelope)
}

// ==================== Client sub-records ====================

/// Records of one client, newest first.
pub async fn list_records<R>(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    ClientScope(client_id): ClientScope,
) -> Result<Json<Vec<R>>, ApiError>
where
    R: ClientRecord + Serialize + Send + 'static,
{
    blocking(&state, move |core| {
        core.with_clients(lang, |clients| clients.records::<R>().list(client_id))?
            .map_err(Into::into)
    })
    .await
    .map(Json)
}

/// Add a record; the owning client comes from the form's `clientId`.
pub async fn add_record<R>(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Form(form): Form<R::Dto>,
) -> Result<Envelope<Vec<R>>, ApiError>
where
    R: ClientRecord + Serialize + Send + 'static,
    R::Dto: RecordForm + DeserializeOwned + Send + 'static,
{
    blocking(&state, move |core| {
        let user = core.acting_user_id();
        let client_id = form.client_id();
        core.with_clients(lang, |clients| clients.records::<R>().add(client_id, &form, user))
    })
    .await
    .map(envelope)
}

pub async fn delete_record<R>(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    Path(id): Path<i64>,
    ClientScope(client_id): ClientScope,
) -> Result<Envelope<Vec<R>>, ApiError>
where
    R: ClientRecord + Serialize + Send + 'static,
{
    blocking(&state, move |core| {
        core.with_clients(lang, |clients| clients.records::<R>().delete(id, client_id))
    })
    .await
    .map(envelope)
}

/// Forms that name their owning client.
pub trait RecordForm {
    fn client_id(&self) -> i64;
}

macro_rules! record_form {
    ($($dto:ty),* $(,)?) => {
        $(impl RecordForm for $dto {
            fn client_id(&self) -> i64 {
                self.client_id
            }
        })*
    };
}

record_form!(
    calorizer_core::WeightHistoryDto,
    calorizer_core::BiochemicalMedicalTestDto,
    calorizer_core::DrugsSupplementDto,
    calorizer_core::MedicalHistoryDto,
);

// ==================== Lookups ====================

pub async fn genders(State(state): State<AppState>) -> Result<Json<Vec<LookupDto>>, ApiError> {
    blocking(&state, |core| {
        core.with_lookups(|lookups| lookups.lookup_items(LookupType::Gender))?
            .map_err(Into::into)
    })
    .await
    .map(Json)
}

pub async fn lookup_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LookupDto>, ApiError> {
    let lookup = blocking(&state, move |core| {
        core.with_lookups(|lookups| lookups.lookup_by_id(id))?
            .map_err(Into::into)
    })
    .await?;

    lookup
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Lookup not found"))
}

// ==================== Translations ====================

/// Whole message table in the request language, for client-side labels.
pub async fn translations(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> Json<HashMap<String, String>> {
    Json(state.core.localizer().all(lang))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadRes {
    pub count: usize,
}

pub async fn reload_translations(
    State(state): State<AppState>,
) -> Result<Json<ReloadRes>, ApiError> {
    let core = state.core.clone();
    let reloaded = tokio::task::spawn_blocking(move || core.reload_translations())
        .await
        .map_err(|e| {
            tracing::error!("blocking task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        })?;

    match reloaded {
        Ok(count) => Ok(Json(ReloadRes { count })),
        Err(e) => {
            tracing::warn!("{e}");
            Err((StatusCode::UNPROCESSABLE_ENTITY, "Translation reload failed"))
        }
    }
}
