//! Request language resolution and the language switch endpoint.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{
        header::{ACCEPT_LANGUAGE, COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap,
    },
    response::{IntoResponse, Redirect, Response},
};
use calorizer_core::Language;
use serde::Deserialize;
use std::convert::Infallible;

/// Cookie holding the chosen language.
pub const LANGUAGE_COOKIE: &str = "Language";

/// One year, in seconds.
const COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

/// Language of the current request.
///
/// Resolved from the `lang` query parameter, then the `Language` cookie,
/// then `Accept-Language` (anything starting with `ar` is Arabic). Defaults
/// to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLanguage(pub Language);

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestLanguage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestLanguage(request_language(parts)))
    }
}

/// Language of a request, from its URI and headers.
pub(crate) fn request_language(parts: &Parts) -> Language {
    let from_query = Query::<LangQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.lang)
        .and_then(|code| Language::parse(&code));

    from_query
        .or_else(|| cookie_language(&parts.headers))
        .or_else(|| accept_language(&parts.headers))
        .unwrap_or_default()
}

fn cookie_language(headers: &HeaderMap) -> Option<Language> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LANGUAGE_COOKIE)
        .and_then(|(_, value)| Language::parse(value))
}

fn accept_language(headers: &HeaderMap) -> Option<Language> {
    let value = headers.get(ACCEPT_LANGUAGE)?.to_str().ok()?;
    value
        .trim()
        .get(..2)
        .filter(|prefix| prefix.eq_ignore_ascii_case("ar"))
        .map(|_| Language::Ar)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLanguageQuery {
    pub language: Option<String>,
    pub return_url: Option<String>,
}

/// Remember the chosen language in a cookie and redirect back.
///
/// Only `en` and `ar` are accepted; anything else just redirects.
pub async fn set_language(Query(query): Query<SetLanguageQuery>) -> Response {
    let target = local_return_url(query.return_url.as_deref());
    let redirect = Redirect::to(target);

    match query.language.as_deref().and_then(Language::parse) {
        Some(language) => {
            tracing::debug!(language = %language, "language switched");
            let cookie = format!(
                "{}={}; Path=/; Max-Age={}; SameSite=Lax",
                LANGUAGE_COOKIE,
                language.as_str(),
                COOKIE_MAX_AGE
            );
            ([(SET_COOKIE, cookie)], redirect).into_response()
        }
        None => redirect.into_response(),
    }
}

/// Only same-site paths are followed; anything else goes home.
fn local_return_url(url: Option<&str>) -> &str {
    match url {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\") => {
            url
        }
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    async fn resolve(request: Request<()>) -> Language {
        let (mut parts, _) = request.into_parts();
        let RequestLanguage(language) = RequestLanguage::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        language
    }

    #[tokio::test]
    async fn test_query_wins_over_cookie() {
        let request = Request::builder()
            .uri("/clients?lang=ar")
            .header(COOKIE, "Language=en")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await, Language::Ar);
    }

    #[tokio::test]
    async fn test_cookie_then_accept_language() {
        let request = Request::builder()
            .uri("/clients")
            .header(COOKIE, "theme=dark; Language=ar")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await, Language::Ar);

        let request = Request::builder()
            .uri("/clients?lang=fr")
            .header(ACCEPT_LANGUAGE, "ar-EG,ar;q=0.9")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await, Language::Ar);
    }

    #[tokio::test]
    async fn test_defaults_to_english() {
        let request = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(resolve(request).await, Language::En);
    }

    #[test]
    fn test_cookie_parsing_ignores_unknown_values() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("Language=de"));
        assert_eq!(cookie_language(&headers), None);
    }

    #[test]
    fn test_local_return_url() {
        assert_eq!(local_return_url(Some("/clients/3")), "/clients/3");
        assert_eq!(local_return_url(Some("https://evil.example")), "/");
        assert_eq!(local_return_url(Some("//evil.example")), "/");
        assert_eq!(local_return_url(None), "/");
    }
}
