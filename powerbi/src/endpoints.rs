//! Addresses of the identity provider and the REST API.

use crate::constants::{API_BASE, PBI_AUTHORITY, PBI_RESOURCE};
use crate::types::{ApiUrl, AuthorityUrl, Resource};
use serde::{Deserialize, Serialize};

/// Where to authenticate and where to send API calls. The default values
/// point to the public Power BI service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    pub authority: AuthorityUrl,
    pub resource: Resource,
    pub api_url: ApiUrl,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authority: AuthorityUrl::from_static(PBI_AUTHORITY),
            resource: Resource::from_static(PBI_RESOURCE),
            api_url: ApiUrl::from_static(API_BASE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let e: Endpoints =
            serde_json::from_str(r#"{"api_url": "http://localhost:9000/v1.0/myorg/"}"#).unwrap();
        assert_eq!(e.api_url.as_str(), "http://localhost:9000/v1.0/myorg/");
        assert_eq!(e.authority.as_str(), PBI_AUTHORITY);
        assert_eq!(e.resource.as_str(), PBI_RESOURCE);
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        assert!(serde_json::from_str::<Endpoints>(r#"{"api_url": "localhost"}"#).is_err());
    }
}
