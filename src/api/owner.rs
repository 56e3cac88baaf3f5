use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::FitTrackError;

/// Header carrying the identity every record is scoped to
pub const OWNER_HEADER: &str = "x-owner-id";

/// Owner identifier taken from the `X-Owner-Id` request header
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = FitTrackError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| OwnerId(value.to_string()))
            .ok_or(FitTrackError::MissingOwner)
    }
}
