//! Wire types for the auth endpoints and the profile kept in the session.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Body of `POST /auth/login` and `POST /auth/register`.
#[derive(Serialize)]
pub struct CredentialsRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for CredentialsRequest<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Auth response. Login always carries a token; register may only echo the
/// created profile.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default, alias = "token", deserialize_with = "secret_from_string")]
    pub access_token: Option<SecretString>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

fn secret_from_string<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(SecretString::from))
}

/// `GET /auth/me` payload.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Profile fields held by the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub username: String,
    pub is_admin: bool,
}

impl From<UserOut> for UserProfile {
    fn from(user: UserOut) -> Self {
        Self {
            id: Some(user.id),
            username: user.username,
            is_admin: user.is_admin,
        }
    }
}
