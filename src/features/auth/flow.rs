//! Login, registration and profile refresh. Each flow finishes the network
//! call before touching the session, so a failed or timed-out request leaves
//! the credential store and the session exactly as they were.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::auth::{
        client,
        state::{SessionContext, SessionSnapshot},
        types::{AuthResponse, CredentialsRequest, UserProfile},
    },
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

/// Result of a registration.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The backend issued a token; the session is established.
    SignedIn(SessionSnapshot),
    /// The account exists but the user still has to log in.
    Registered(UserProfile),
}

/// Logs in and establishes the session.
#[instrument(skip(api, session, password))]
pub async fn login(
    api: &ApiClient,
    session: &SessionContext,
    username: &str,
    password: &SecretString,
) -> Result<SessionSnapshot, AppError> {
    let username = validate_credentials(username, password)?;
    let request = CredentialsRequest {
        username,
        password: password.expose_secret(),
    };
    let response = client::login(api, &request).await?;
    let (profile, token) = split_response(response, username);
    let token = token.ok_or_else(|| {
        AppError::Parse("Login response did not include a token.".to_string())
    })?;

    session.set_user(profile, &token)?;
    info!("login succeeded");
    Ok(session.snapshot())
}

/// Registers an account and signs in when the backend hands out a token.
#[instrument(skip(api, session, password))]
pub async fn register(
    api: &ApiClient,
    session: &SessionContext,
    username: &str,
    password: &SecretString,
) -> Result<RegisterOutcome, AppError> {
    let username = validate_credentials(username, password)?;
    let request = CredentialsRequest {
        username,
        password: password.expose_secret(),
    };
    let response = client::register(api, &request).await?;
    let (profile, token) = split_response(response, username);

    match token {
        Some(token) => {
            session.set_user(profile, &token)?;
            info!("registration succeeded, session established");
            Ok(RegisterOutcome::SignedIn(session.snapshot()))
        }
        None => {
            info!("registration succeeded");
            Ok(RegisterOutcome::Registered(profile))
        }
    }
}

/// Reloads the profile for the stored credential from `/auth/me`.
///
/// A rejected credential logs the session out before the error is returned.
#[instrument(skip_all)]
pub async fn refresh_profile(
    api: &ApiClient,
    session: &SessionContext,
) -> Result<SessionSnapshot, AppError> {
    match client::me(api).await {
        Ok(user) => {
            session.update_profile(user.into());
            session.resync_auth_flag()?;
            Ok(session.snapshot())
        }
        Err(err) if err.is_auth_rejected() => {
            warn!("stored credential was rejected, logging out");
            session.logout()?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}

fn validate_credentials<'a>(
    username: &'a str,
    password: &SecretString,
) -> Result<&'a str, AppError> {
    let username = username.trim();
    if username.is_empty() || password.expose_secret().trim().is_empty() {
        return Err(AppError::Config(
            "Username and password are required.".to_string(),
        ));
    }
    Ok(username)
}

fn split_response(response: AuthResponse, username: &str) -> (UserProfile, Option<SecretString>) {
    let profile = UserProfile {
        id: response.id,
        username: response
            .username
            .unwrap_or_else(|| username.to_string()),
        is_admin: response.is_admin,
    };
    let token = response
        .access_token
        .filter(|token| !token.expose_secret().trim().is_empty());
    (profile, token)
}
