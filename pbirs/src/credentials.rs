use crate::config::PbirsConfig;
use crate::prompt::{prompt_if_missing, prompt_if_missing_password};
use color_eyre::eyre::{self, bail, eyre, Result, WrapErr};
use powerbi::types::{ApiUrl, ClientId, Username};
use powerbi::PowerBiClient;
use std::path::PathBuf;

/// Command-line options of `pbirs` which are relevant to identifying the user
/// and obtaining a connected client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Option<Username>,
    pub password: Option<String>,
    pub password_from_stdin: bool,
    pub client_id: Option<ClientId>,
    pub token: Option<String>,
    pub api_url: Option<ApiUrl>,
    /// Name of configuration file.
    ///
    /// - `None`: use default configuration file (for main use)
    /// - `Some(_)`: custom configuration file (for testing purposes only)
    pub config_path: Option<PathBuf>,
}

impl Credentials {
    /// If `--token` is given, use it as the bearer token. Otherwise authenticate
    /// with username and password, prompting for whichever is missing.
    /// Values not given on the command line are taken from the configuration file.
    pub fn get_client(self) -> Result<PowerBiClient> {
        if self.password.is_some() && self.password_from_stdin {
            bail!("Options --password and --password-stdin may not be used together.");
        }
        let config = PbirsConfig::load(self.config_path.as_deref())?;
        let mut endpoints = config.endpoints;
        if let Some(api_url) = self.api_url {
            endpoints.api_url = api_url;
        }
        let client_id = self.client_id.or(config.client_id).ok_or_else(|| {
            eyre!("No client ID. Give --client-id or save one with `pbirs config --set-client-id`.")
        })?;
        let username = self.username.or(config.username);

        if let Some(token) = self.token {
            let username = username.unwrap_or_else(|| Username::from(""));
            return PowerBiClient::build(username, String::new(), client_id)
                .endpoints(endpoints)
                .token(token)
                .build()
                .map_err(eyre::Error::new);
        }

        let username = prompt_if_missing(username, "username")?;
        let password =
            prompt_if_missing_password(self.password, "password", self.password_from_stdin)?;
        let mut client = PowerBiClient::build(username, password, client_id)
            .endpoints(endpoints)
            .build()?;
        client.connect().wrap_err("Could not log in")?;
        match client.token().and_then(|t| t.expires_at()) {
            Some(t) => log::info!("logged in as {}, token expires at {}", client.username(), t),
            None => log::info!("logged in as {}", client.username()),
        }
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use powerbi::types::AuthorityUrl;
    use powerbi::Endpoints;
    use serde_json::json;
    use tempfile::TempDir;

    fn credentials(config_path: PathBuf) -> Credentials {
        Credentials {
            username: None,
            password: None,
            password_from_stdin: false,
            client_id: None,
            token: None,
            api_url: None,
            config_path: Some(config_path),
        }
    }

    fn store_config(dir: &TempDir, config: PbirsConfig) -> Result<PathBuf> {
        let path = dir.path().join("pbirs.ron");
        config.store(Some(path.as_path()))?;
        Ok(path)
    }

    #[test]
    fn test_password_and_password_stdin_conflict() -> Result<()> {
        let dir = TempDir::new()?;
        let mut c = credentials(dir.path().join("pbirs.ron"));
        c.password = Some("hunter2".to_string());
        c.password_from_stdin = true;
        let e = c.get_client().unwrap_err();
        assert!(e.to_string().contains("--password-stdin"));
        Ok(())
    }

    #[test]
    fn test_missing_client_id() -> Result<()> {
        let dir = TempDir::new()?;
        let mut c = credentials(dir.path().join("pbirs.ron"));
        c.token = Some("abc".to_string());
        let e = c.get_client().unwrap_err();
        assert!(e.to_string().contains("--set-client-id"));
        Ok(())
    }

    #[test]
    fn test_token_skips_login_and_flags_override_config() -> Result<()> {
        let dir = TempDir::new()?;
        let path = store_config(
            &dir,
            PbirsConfig {
                client_id: Some(ClientId::from("saved-app")),
                username: Some(Username::from("saved@contoso.com")),
                endpoints: Endpoints::default(),
            },
        )?;
        let mut c = credentials(path);
        c.token = Some("abc".to_string());
        c.api_url = Some(ApiUrl::try_from("http://localhost:9000/v1.0/myorg/")?);
        let client = c.get_client()?;
        assert!(client.is_connected());
        assert_eq!(client.token().unwrap().as_str(), "abc");
        assert_eq!(client.username().as_str(), "saved@contoso.com");
        assert_eq!(client.api_url().as_str(), "http://localhost:9000/v1.0/myorg/");
        Ok(())
    }

    #[test]
    fn test_login_prefers_flags_over_config() -> Result<()> {
        let server = MockServer::start();
        let login = server.mock(|when, then| {
            when.method(POST)
                .path("/common/oauth2/token")
                .form_urlencoded_tuple("client_id", "flag-app")
                .form_urlencoded_tuple("username", "flag@contoso.com")
                .form_urlencoded_tuple("password", "hunter2");
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3599}));
        });
        let dir = TempDir::new()?;
        let mut endpoints = Endpoints::default();
        endpoints.authority = AuthorityUrl::try_from(server.url("/common"))?;
        let path = store_config(
            &dir,
            PbirsConfig {
                client_id: Some(ClientId::from("saved-app")),
                username: Some(Username::from("saved@contoso.com")),
                endpoints,
            },
        )?;
        let mut c = credentials(path);
        c.client_id = Some(ClientId::from("flag-app"));
        c.username = Some(Username::from("flag@contoso.com"));
        c.password = Some("hunter2".to_string());
        let client = c.get_client()?;
        login.assert();
        assert!(client.is_connected());
        assert!(client.token().unwrap().expires_at().is_some());
        Ok(())
    }

    #[test]
    fn test_rejected_login_is_error() -> Result<()> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/common/oauth2/token");
            then.status(400)
                .json_body(json!({"error": "invalid_grant", "error_description": "bad password"}));
        });
        let dir = TempDir::new()?;
        let mut endpoints = Endpoints::default();
        endpoints.authority = AuthorityUrl::try_from(server.url("/common"))?;
        let path = store_config(
            &dir,
            PbirsConfig {
                client_id: Some(ClientId::from("saved-app")),
                username: Some(Username::from("saved@contoso.com")),
                endpoints,
            },
        )?;
        let mut c = credentials(path);
        c.password = Some("wrong".to_string());
        let e = c.get_client().unwrap_err();
        assert_eq!(e.to_string(), "Could not log in");
        Ok(())
    }
}
