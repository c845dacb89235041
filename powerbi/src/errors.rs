//! Errors for this crate.

use reqwest::StatusCode;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum InvalidApiUrl {
    #[error("Given URL does not end with \"/\": {0}")]
    TrailingSlash(String),

    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),
}

#[derive(thiserror::Error, Debug)]
#[error("Given authority URL does not start with \"http://\" or \"https://\": {0}")]
pub struct InvalidAuthorityUrl(pub String);

#[derive(thiserror::Error, Debug)]
#[error("\"{0}\" is not an access level, expected one of: View, Edit, Create")]
pub struct InvalidAccessLevel(pub String);

aliri_braid::from_infallible!(InvalidApiUrl);
aliri_braid::from_infallible!(InvalidAuthorityUrl);

/// Errors from the identity provider while acquiring a bearer token.
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// The identity provider refused the credentials.
    #[error("authentication failed ({error}): {description}")]
    Rejected { error: String, description: String },

    #[error(transparent)]
    Raw(#[from] reqwest::Error),
}

/// Errors representing failed interactions with the Power BI API.
#[derive(thiserror::Error, Debug)]
pub enum PowerBiError {
    /// Response body carried an `"error"` key.
    #[error("Site returned error: {0}")]
    Api(Value),

    /// Error status without an `"error"` body.
    #[error("({status:?} {reason:?}): {text}")]
    Error {
        status: StatusCode,
        reason: &'static str,
        text: String,
    },

    #[error(transparent)]
    Raw(#[from] reqwest::Error),

    /// Body of a successful response could not be decoded.
    #[error("Could not decode response from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// No bearer token, `connect` was never called or it failed.
    #[error("Not connected to Power BI")]
    NotConnected,
}

#[derive(thiserror::Error, Debug)]
pub enum GetError {
    #[error(transparent)]
    PowerBi(#[from] PowerBiError),

    /// More than one entity matched a lookup which expects at most one.
    #[error("Duplicate {kind}s found for \"{key}\"")]
    Duplicate { kind: &'static str, key: String },
}

/// Read the body of a response as JSON, failing on an embedded `"error"` key
/// or an error status.
pub(crate) fn check(res: reqwest::blocking::Response) -> Result<Value, PowerBiError> {
    let url = res.url().to_string();
    let status = res.status();
    let text = res.text()?;
    log::debug!("{} {}: {}", status.as_u16(), &url, &text);
    check_body(url, status, text)
}

fn check_body(url: String, status: StatusCode, text: String) -> Result<Value, PowerBiError> {
    let parsed = if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&text)
    };
    match parsed {
        Ok(body) if body.get("error").is_some() => Err(PowerBiError::Api(body)),
        _ if !status.is_success() => {
            let reason = status.canonical_reason().unwrap_or("unknown reason");
            Err(PowerBiError::Error {
                status,
                reason,
                text,
            })
        }
        Ok(body) => Ok(body),
        Err(source) => Err(PowerBiError::Json { url, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    const URL: &str = "https://api.powerbi.com/v1.0/myorg/groups";

    fn run(status: u16, text: &str) -> Result<Value, PowerBiError> {
        check_body(
            URL.to_string(),
            StatusCode::from_u16(status).unwrap(),
            text.to_string(),
        )
    }

    #[rstest]
    #[case(200)]
    #[case(403)]
    #[case(404)]
    fn test_error_key_is_api_error(#[case] status: u16) {
        let body = r#"{"error":{"code":"PowerBINotAuthorizedException","message":"nope"}}"#;
        match run(status, body).unwrap_err() {
            PowerBiError::Api(v) => {
                assert_eq!(v["error"]["code"], "PowerBINotAuthorizedException")
            }
            e => panic!("unexpected error: {e:?}"),
        }
    }

    #[test]
    fn test_api_error_message_echoes_body() {
        let e = run(200, r#"{"error":"bad"}"#).unwrap_err();
        assert_eq!(e.to_string(), r#"Site returned error: {"error":"bad"}"#);
    }

    #[rstest]
    #[case(500, "upstream exploded")]
    #[case(401, "")]
    #[case(404, r#"{"message":"gone"}"#)]
    fn test_error_status_without_error_key(#[case] status: u16, #[case] text: &str) {
        match run(status, text).unwrap_err() {
            PowerBiError::Error { status: s, text: t, .. } => {
                assert_eq!(s.as_u16(), status);
                assert_eq!(t, text);
            }
            e => panic!("unexpected error: {e:?}"),
        }
    }

    #[test]
    fn test_success_returns_body() {
        let body = run(200, r#"{"value":[]}"#).unwrap();
        assert_eq!(body["value"], serde_json::json!([]));
    }

    #[test]
    fn test_empty_success_body_is_null() {
        assert_eq!(run(200, "").unwrap(), Value::Null);
    }

    #[test]
    fn test_garbage_success_body() {
        assert!(matches!(
            run(200, "<html>").unwrap_err(),
            PowerBiError::Json { .. }
        ))
    }
}
