//! NewTypes for the addresses a client talks to.

use crate::errors::{InvalidApiUrl, InvalidAuthorityUrl};
use aliri_braid::braid;

/// An [ApiUrl] is the base URL of the Power BI REST API, e.g.
/// `https://api.powerbi.com/v1.0/myorg/`
#[braid(validator, serde)]
pub struct ApiUrl(String);

impl aliri_braid::Validator for ApiUrl {
    type Error = InvalidApiUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !has_http_protocol(s) {
            Err(InvalidApiUrl::Protocol(s.to_string()))
        } else if !s.ends_with('/') {
            Err(InvalidApiUrl::TrailingSlash(s.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Identity provider authority, e.g. `https://login.microsoftonline.com/common`
#[braid(validator, serde)]
pub struct AuthorityUrl(String);

impl aliri_braid::Validator for AuthorityUrl {
    type Error = InvalidAuthorityUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if has_http_protocol(s) {
            Ok(())
        } else {
            Err(InvalidAuthorityUrl(s.to_string()))
        }
    }
}

impl AuthorityUrlRef {
    /// The OAuth2 token endpoint of this authority.
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.as_str().trim_end_matches('/'))
    }
}

fn has_http_protocol(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
