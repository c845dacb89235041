use super::session::PowerBiClient;
use crate::auth::{AadAuth, AadToken};
use crate::endpoints::Endpoints;
use crate::types::{ApiUrl, AuthorityUrl, ClientId, Username};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Builder for [PowerBiClient], for talking to endpoints other than the
/// public Power BI service or reusing a token obtained elsewhere.
pub struct PowerBiClientBuilder {
    username: Username,
    password: String,
    client_id: ClientId,
    endpoints: Endpoints,
    token: Option<AadToken>,
    builder: reqwest::blocking::ClientBuilder,
}

impl PowerBiClientBuilder {
    pub(crate) fn new(username: Username, password: String, client_id: ClientId) -> Self {
        let builder = reqwest::blocking::ClientBuilder::new().default_headers(accept_json());
        Self {
            username,
            password,
            client_id,
            endpoints: Default::default(),
            token: None,
            builder,
        }
    }

    /// Replace all endpoints.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Base URL of the REST API.
    pub fn api_url(mut self, api_url: ApiUrl) -> Self {
        self.endpoints.api_url = api_url;
        self
    }

    /// Identity provider authority.
    pub fn authority(mut self, authority: AuthorityUrl) -> Self {
        self.endpoints.authority = authority;
        self
    }

    /// Use an existing bearer token. The client starts out connected.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.aad_token(AadToken::new(token))
    }

    /// Use an existing bearer token whose expiry is known.
    pub fn aad_token(mut self, token: AadToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Create the client. Does not contact any server.
    pub fn build(self) -> Result<PowerBiClient, reqwest::Error> {
        let http = self.builder.build()?;
        let auth = AadAuth {
            client: http.clone(),
            username: self.username,
            password: self.password,
            client_id: self.client_id,
            endpoints: self.endpoints,
        };
        Ok(PowerBiClient::from_parts(http, auth, self.token))
    }
}

fn accept_json() -> HeaderMap {
    HeaderMap::from_iter([(ACCEPT, HeaderValue::from_static("application/json"))])
}
