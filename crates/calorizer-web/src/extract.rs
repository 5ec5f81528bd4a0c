//! Extractors whose rejections are response envelopes.
//!
//! A body or query that cannot be read answers 400 with the translated
//! `InvalidRequest` message, never the raw deserializer text.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response as HttpResponse},
};
use calorizer_core::{services::keys, Language, Response};
use serde::{de::DeserializeOwned, Deserialize};

use crate::language::request_language;
use crate::AppState;

/// Translated 400 envelope for an unreadable request.
#[derive(Debug)]
pub struct InvalidRequest(Response<()>);

impl InvalidRequest {
    fn new(state: &AppState, language: Language, detail: &str) -> Self {
        tracing::debug!(detail, "rejected unreadable request");
        Self(Response::failure(
            keys::INVALID_REQUEST,
            state.core.localizer(),
            language,
        ))
    }
}

impl IntoResponse for InvalidRequest {
    fn into_response(self) -> HttpResponse {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

/// JSON form body.
#[derive(Debug)]
pub struct Form<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for Form<T>
where
    T: DeserializeOwned,
{
    type Rejection = InvalidRequest;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let language = request_language(&parts);

        match Json::<T>::from_request(Request::from_parts(parts, body), state).await {
            Ok(Json(value)) => Ok(Form(value)),
            Err(rejection) => Err(InvalidRequest::new(state, language, &rejection.body_text())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientQuery {
    client_id: i64,
}

/// The owning client named by the `clientId` query parameter.
#[derive(Debug, Clone, Copy)]
pub struct ClientScope(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for ClientScope {
    type Rejection = InvalidRequest;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Query::<ClientQuery>::try_from_uri(&parts.uri) {
            Ok(Query(query)) => Ok(ClientScope(query.client_id)),
            Err(rejection) => Err(InvalidRequest::new(
                state,
                request_language(parts),
                &rejection.body_text(),
            )),
        }
    }
}
