use crate::application::catalog::CatalogError;
use crate::ports::{Principal, Role};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use base64::{Engine, engine::general_purpose};
use std::sync::Arc;

use super::{error::ApiError, handlers::AppState};

/// ADMINロールを持つ認証済み利用者
///
/// ハンドラーの引数に置くと、HTTP Basic認証とロールの確認が行われる。
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

/// Authorizationヘッダーから Basic 認証の資格情報を取り出す
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Full authentication is required"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Malformed Authorization header"))?;

    let (scheme, encoded) = value
        .split_once(' ')
        .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return Err(ApiError::unauthorized("Unsupported authentication scheme"));
    }

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;

    Ok((username.to_string(), password.to_string()))
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let (username, password) = basic_credentials(&parts.headers)?;

        let principal = state
            .credentials
            .authenticate(&username, &password)
            .await
            .map_err(|e| ApiError(CatalogError::RepositoryError(e)))?
            .ok_or_else(|| {
                tracing::warn!("Authentication failed for user: {}", username);
                ApiError::unauthorized("Bad credentials")
            })?;

        if !principal.has_role(Role::Admin) {
            tracing::warn!("User {} lacks the ADMIN role", principal.username);
            return Err(ApiError::unauthorized("Admin role required"));
        }

        Ok(AdminUser(principal))
    }
}
