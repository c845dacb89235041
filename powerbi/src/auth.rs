//! Predecessor to [crate::PowerBiClient] for getting bearer tokens
//! from the identity provider.

use crate::endpoints::Endpoints;
use crate::errors::AuthError;
use crate::types::{ClientId, Username};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use time::{Duration, OffsetDateTime};

#[serde_as]
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    // v1 endpoints send numbers as strings
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    expires_in: i64,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'static str,
    resource: &'a str,
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
}

/// A bearer token and when it stops being valid.
#[derive(Clone)]
pub struct AadToken {
    access_token: String,
    expires_at: Option<OffsetDateTime>,
}

impl AadToken {
    /// A token which was obtained elsewhere. Its expiry is unknown.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// A token which stops being valid at `expires_at`.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: OffsetDateTime) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|t| t <= OffsetDateTime::now_utc())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for AadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AadToken")
            .field("access_token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Username, password and application ID for the resource-owner password
/// credentials flow.
pub struct AadAuth {
    pub client: reqwest::blocking::Client,
    pub username: Username,
    pub password: String,
    pub client_id: ClientId,
    pub endpoints: Endpoints,
}

impl AadAuth {
    /// Exchange the credentials for a bearer token.
    pub fn get_token(&self) -> Result<AadToken, AuthError> {
        let url = self.endpoints.authority.token_endpoint();
        log::debug!("requesting token from {} for {}", &url, &self.username);
        let res = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&PasswordGrant {
                grant_type: "password",
                resource: self.endpoints.resource.as_str(),
                client_id: self.client_id.as_str(),
                username: self.username.as_str(),
                password: &self.password,
            })
            .send()?;
        let status = res.status();
        let text = res.text()?;
        if let Ok(rejection) = serde_json::from_str::<TokenErrorResponse>(&text) {
            return Err(AuthError::Rejected {
                error: rejection.error,
                description: rejection.error_description,
            });
        }
        if !status.is_success() {
            return Err(AuthError::Rejected {
                error: status.to_string(),
                description: text,
            });
        }
        let token: TokenResponse =
            serde_json::from_str(&text).map_err(|e| AuthError::Rejected {
                error: "invalid_response".to_string(),
                description: e.to_string(),
            })?;
        let expires_at = OffsetDateTime::now_utc().checked_add(Duration::seconds(token.expires_in));
        if expires_at.is_none() {
            log::warn!(
                "token lifetime of {}s is out of range, treating its expiry as unknown",
                token.expires_in
            );
        }
        Ok(AadToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}
