//! Caller identity. Authentication proper is delegated to an external
//! identity provider; requests arrive with an `x-account-id` header that we
//! resolve to a stored account. Missing header is 401, unknown account 404.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::game::types::AccountRecord;

pub const ACCOUNT_HEADER: &str = "x-account-id";

/// The authenticated account, loaded fresh from storage per request.
pub struct Identity(pub AccountRecord);

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account_id = parts
            .headers
            .get(ACCOUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::unauthorized("missing x-account-id header"))?;

        let account = state.store.get_account(account_id.trim())?;
        Ok(Identity(account))
    }
}
