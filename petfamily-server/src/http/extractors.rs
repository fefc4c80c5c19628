//! Custom Axum extractors

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::models::field::parse_id;
use crate::models::ValidationError;

/// Extract and validate a positive integer id from path
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(parse_id("id", &raw)?))
    }
}

/// Raw list query parameters
///
/// An undecodable query string is a 400 in the API's error envelope.
pub struct ListQuery(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                ApiError::Validation(ValidationError::MalformedQuery {
                    reason: e.body_text(),
                })
            })?;
        Ok(Self(params))
    }
}

/// JSON object body
///
/// Rejects malformed JSON, a missing content type and non-object bodies
/// with a 400 in the API's error envelope instead of axum's plain text.
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                ApiError::Validation(ValidationError::MalformedBody {
                    reason: e.body_text(),
                })
            })?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ApiError::Validation(ValidationError::MalformedBody {
                reason: "esperado um objeto JSON".into(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn parts(uri: &str) -> Parts {
        let (parts, _) = axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn list_query_decodes_parameters() {
        let mut parts = parts("/estados?nome=S%C3%A3o+Paulo&sigla=sp");
        let ListQuery(params) = ListQuery::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(params.get("nome").map(String::as_str), Some("São Paulo"));
        assert_eq!(params.get("sigla").map(String::as_str), Some("sp"));
    }

    #[tokio::test]
    async fn malformed_query_uses_error_envelope() {
        let err = ApiError::Validation(ValidationError::MalformedQuery {
            reason: "expected `=`".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("parâmetros de consulta inválidos"));
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn id_outside_a_route_is_rejected() {
        let mut parts = parts("/cidades/7");
        // No matched route, so no path params
        let err = ValidId::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
