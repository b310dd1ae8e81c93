//! Client wrappers for the auth endpoints. These helpers only talk to the
//! backend; persisting the returned token is done by the flows in
//! [`crate::features::auth::flow`].

use crate::{
    api::ApiClient,
    errors::AppError,
    features::auth::types::{AuthResponse, CredentialsRequest, UserOut},
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const ME_PATH: &str = "/auth/me";

/// Exchanges username and password for a bearer token.
/// Must never log the password.
pub async fn login(
    api: &ApiClient,
    request: &CredentialsRequest<'_>,
) -> Result<AuthResponse, AppError> {
    api.post_json(LOGIN_PATH, request).await
}

/// Creates an account. The backend may or may not answer with a token.
pub async fn register(
    api: &ApiClient,
    request: &CredentialsRequest<'_>,
) -> Result<AuthResponse, AppError> {
    api.post_json(REGISTER_PATH, request).await
}

/// Fetches the profile of the credential currently in the store.
pub async fn me(api: &ApiClient) -> Result<UserOut, AppError> {
    api.get_json(ME_PATH).await
}
