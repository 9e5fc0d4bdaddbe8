use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cardex_core::OwnerId;

use crate::error::ApiError;

pub const OWNER_HEADER: &str = "x-owner-id";

/// The caller's identity, taken from the `x-owner-id` header. Every record
/// read or written is scoped to this id.
#[derive(Debug, Clone, Copy)]
pub struct Owner(pub OwnerId);

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(OWNER_HEADER)
            .ok_or(ApiError::MissingOwner)?
            .to_str()
            .map_err(|_| ApiError::InvalidOwner)?;
        let id: i64 = value.trim().parse().map_err(|_| ApiError::InvalidOwner)?;
        if id <= 0 {
            return Err(ApiError::InvalidOwner);
        }
        Ok(Owner(OwnerId(id)))
    }
}
