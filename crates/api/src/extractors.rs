//! Request extractors.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::json;
use uuid::Uuid;

use centavo_shared::types::ActorId;

/// Header carrying the authenticated actor's ID, set by the upstream
/// gateway.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Extractor for the acting user, taken from the `x-actor-id` header.
///
/// The gateway authenticates requests and forwards the actor's UUID; this
/// service trusts the header. An absent header means an anonymous request:
/// writes are still allowed but not audited. A malformed header is rejected
/// with 400.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext(pub Option<ActorId>);

impl ActorContext {
    /// Returns the actor ID, if the request carried one.
    #[must_use]
    pub const fn actor(&self) -> Option<ActorId> {
        self.0
    }
}

impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTOR_HEADER) else {
            return Ok(Self(None));
        };

        let actor = value
            .to_str()
            .ok()
            .and_then(|text| Uuid::parse_str(text.trim()).ok())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "VALIDATION_ERROR",
                        "message": "x-actor-id header must be a UUID"
                    })),
                )
            })?;

        Ok(Self(Some(ActorId::from_uuid(actor))))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRequestParts;
    use axum::http::Request;
    use rstest::rstest;

    use super::*;

    async fn extract(header: Option<&str>) -> Result<ActorContext, StatusCode> {
        let mut builder = Request::builder().uri("/api/v1/entries");
        if let Some(value) = header {
            builder = builder.header(ACTOR_HEADER, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();

        ActorContext::from_request_parts(&mut parts, &())
            .await
            .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn test_absent_header_is_anonymous() {
        let context = extract(None).await.unwrap();
        assert_eq!(context.actor(), None);
    }

    #[tokio::test]
    async fn test_valid_header_yields_actor() {
        let id = Uuid::now_v7();
        let context = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(context.actor(), Some(ActorId::from_uuid(id)));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("12345")]
    #[case("")]
    #[tokio::test]
    async fn test_malformed_header_is_rejected(#[case] value: &str) {
        let status = extract(Some(value)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
