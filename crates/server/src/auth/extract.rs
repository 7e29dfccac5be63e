use crate::{auth::tokens::TokenIssuer, error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use database::services::user::UserService;
use models::role::{Capability, Role};
use uuid::Uuid;

/// The verified caller, extracted from the `Authorization: Bearer` header.
/// The account is re-read on every request so deactivated users and stale
/// role claims lose access immediately.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Authorization gate over the capability set; called by handlers
    /// before they touch any service.
    pub fn require(&self, capability: Capability) -> Result<(), ApiError> {
        if self.role.grants(capability) {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(ApiError::unauthorized)?;

        let claims = state
            .tokens
            .verify_access(token)
            .map_err(|_| ApiError::unauthorized())?;

        let account = UserService::get_user(&state.db, claims.sub)
            .await
            .map_err(|_| ApiError::unauthorized())?;

        if !account.is_active {
            return Err(ApiError::unauthorized());
        }

        Ok(Self {
            id: account.id,
            role: account.role,
        })
    }
}
