use super::builder::PowerBiClientBuilder;
use crate::auth::{AadAuth, AadToken};
use crate::errors::{check, AuthError, GetError, PowerBiError};
use crate::models::data::ValueList;
use crate::models::{
    Dataset, DatasetResponse, GroupResponse, Identified, Report, ReportResponse, Workspace,
};
use crate::routes;
use crate::types::{ApiUrlRef, ClientId, DatasetIdRef, ReportIdRef, Username, WorkspaceIdRef};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Power BI user session.
///
/// Created with credentials, then [PowerBiClient::connect] obtains a bearer token
/// which is reused by every call until it expires. Tokens are not refreshed.
pub struct PowerBiClient {
    http: reqwest::blocking::Client,
    auth: AadAuth,
    token: Option<AadToken>,
}

impl PowerBiClient {
    /// Create a client for the public Power BI service.
    pub fn new(
        username: Username,
        password: String,
        client_id: ClientId,
    ) -> Result<Self, reqwest::Error> {
        Self::build(username, password, client_id).build()
    }

    /// Create a client builder.
    pub fn build(username: Username, password: String, client_id: ClientId) -> PowerBiClientBuilder {
        PowerBiClientBuilder::new(username, password, client_id)
    }

    pub(crate) fn from_parts(
        http: reqwest::blocking::Client,
        auth: AadAuth,
        token: Option<AadToken>,
    ) -> Self {
        Self { http, auth, token }
    }

    /// Authenticate with the identity provider.
    ///
    /// On failure the error is logged and also returned, and the client stays
    /// as it was, i.e. not connected unless it already held a token.
    pub fn connect(&mut self) -> Result<(), AuthError> {
        match self.auth.get_token() {
            Ok(token) => {
                self.token = Some(token);
                Ok(())
            }
            Err(e) => {
                log::error!("Could not connect to Power BI as {}: {}", &self.auth.username, &e);
                Err(e)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&AadToken> {
        self.token.as_ref()
    }

    pub fn username(&self) -> &Username {
        &self.auth.username
    }

    pub fn api_url(&self) -> &ApiUrlRef {
        &self.auth.endpoints.api_url
    }

    // ==================================================
    //                 WORKSPACES
    // ==================================================

    /// Get all workspaces, starting with "My workspace".
    pub fn get_workspaces(&self) -> Result<Vec<Workspace<'_>>, PowerBiError> {
        let groups: Vec<GroupResponse> = self.get_values(&routes::groups(self.api_url()))?;
        let default = std::iter::once(Workspace::default_workspace(self));
        let rest = groups.into_iter().map(|g| Workspace::from_group(self, g));
        Ok(default.chain(rest).collect())
    }

    /// Get a workspace by ID. If `id` is `None`, "My workspace" is returned.
    pub fn get_workspace_by_id(
        &self,
        id: Option<&WorkspaceIdRef>,
    ) -> Result<Option<Workspace<'_>>, PowerBiError> {
        let found = self.get_workspaces()?.into_iter().find(|w| match (w.id(), id) {
            (Some(a), Some(b)) => a.as_str() == b.as_str(),
            (None, None) => true,
            _ => false,
        });
        Ok(found)
    }

    /// Get the first workspace with the given name.
    pub fn get_workspace_by_name(&self, name: &str) -> Result<Option<Workspace<'_>>, PowerBiError> {
        Ok(self.get_workspaces()?.into_iter().find(|w| w.name() == name))
    }

    // ==================================================
    //                 CROSS-WORKSPACE LOOKUPS
    // ==================================================

    /// Find a report by ID in any workspace.
    pub fn get_report_by_id(&self, id: &ReportIdRef) -> Result<Option<Report<'_>>, GetError> {
        let mut found = Vec::new();
        for workspace in self.get_workspaces()? {
            if let Some(report) = workspace.get_report_by_id(id)? {
                found.push(report);
            }
        }
        at_most_one(ReportResponse::KIND, id.as_str(), found)
    }

    /// Find a report by name. If a workspace with the name `workspace_name` exists,
    /// only that workspace is searched, otherwise every workspace is searched
    /// and the name must be unique.
    pub fn get_report_by_name(
        &self,
        name: &str,
        workspace_name: Option<&str>,
    ) -> Result<Option<Report<'_>>, GetError> {
        if let Some(workspace_name) = workspace_name {
            if let Some(workspace) = self.get_workspace_by_name(workspace_name)? {
                return Ok(workspace.get_report_by_name(name)?);
            }
            log::warn!(
                "Workspace \"{}\" not found, searching all workspaces for report \"{}\"",
                workspace_name,
                name
            );
        }
        let mut found = Vec::new();
        for workspace in self.get_workspaces()? {
            if let Some(report) = workspace.get_report_by_name(name)? {
                found.push(report);
            }
        }
        at_most_one(ReportResponse::KIND, name, found)
    }

    /// Find a dataset by ID in any workspace.
    pub fn get_dataset_by_id(&self, id: &DatasetIdRef) -> Result<Option<Dataset<'_>>, GetError> {
        let mut found = Vec::new();
        for workspace in self.get_workspaces()? {
            if let Some(dataset) = workspace.get_dataset_by_id(id)? {
                found.push(dataset);
            }
        }
        at_most_one(DatasetResponse::KIND, id.as_str(), found)
    }

    // ==================================================
    //                 HELPER METHODS
    // ==================================================

    fn bearer(&self) -> Result<&AadToken, PowerBiError> {
        let token = self.token.as_ref().ok_or(PowerBiError::NotConnected)?;
        if token.is_expired() {
            log::warn!("Bearer token for {} has expired", &self.auth.username);
        }
        Ok(token)
    }

    /// GET a listing and return its `value` items.
    pub(crate) fn get_values<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, PowerBiError> {
        log::debug!("GET {}", url);
        let res = self
            .http
            .get(url)
            .bearer_auth(self.bearer()?.as_str())
            .send()?;
        let list: ValueList<T> = decode(url, check(res)?)?;
        Ok(list.value)
    }

    /// POST a JSON body and decode the JSON response.
    pub(crate) fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, PowerBiError> {
        log::debug!("POST {}", url);
        let res = self
            .http
            .post(url)
            .bearer_auth(self.bearer()?.as_str())
            .json(body)
            .send()?;
        decode(url, check(res)?)
    }
}

impl std::fmt::Debug for PowerBiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerBiClient")
            .field("username", &self.auth.username)
            .field("api_url", &self.auth.endpoints.api_url)
            .field("token", &self.token)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: Value) -> Result<T, PowerBiError> {
    serde_json::from_value(body).map_err(|source| PowerBiError::Json {
        url: url.to_string(),
        source,
    })
}

/// Ensure a search across workspaces was not ambiguous.
fn at_most_one<T>(kind: &'static str, key: &str, mut found: Vec<T>) -> Result<Option<T>, GetError> {
    if found.len() > 1 {
        Err(GetError::Duplicate {
            kind,
            key: key.to_string(),
        })
    } else {
        Ok(found.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(vec![], None)]
    #[case(vec![7], Some(7))]
    fn test_at_most_one(#[case] found: Vec<u8>, #[case] expected: Option<u8>) {
        assert_eq!(at_most_one("report", "key", found).unwrap(), expected);
    }

    #[test]
    fn test_duplicate_names_the_key() {
        let e = at_most_one("report", "Sales", vec![1, 2]).unwrap_err();
        assert!(matches!(e, GetError::Duplicate { kind: "report", .. }));
        assert_eq!(e.to_string(), "Duplicate reports found for \"Sales\"");
    }

    #[test]
    fn test_new_client_is_not_connected() {
        let client = PowerBiClient::new(
            Username::from("someone@contoso.com"),
            "hunter2".to_string(),
            ClientId::from("00000000-0000-0000-0000-000000000000"),
        )
        .unwrap();
        assert!(!client.is_connected());
        assert!(matches!(
            client.get_workspaces().unwrap_err(),
            PowerBiError::NotConnected
        ));
    }

    #[test]
    fn test_debug_hides_password() {
        let client = PowerBiClient::build(
            Username::from("someone@contoso.com"),
            "hunter2".to_string(),
            ClientId::from("abc"),
        )
        .token("secret-token")
        .build()
        .unwrap();
        let s = format!("{:?}", client);
        assert!(client.is_connected());
        assert!(!s.contains("hunter2"));
        assert!(!s.contains("secret-token"));
    }
}
