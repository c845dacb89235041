//! pbirs application configuration: which application (client) ID to
//! authenticate with, the default username, and the service endpoints.
//!
//! The file is managed by [confy] under the app name `pbirs`. Passwords
//! and tokens are never saved.

use color_eyre::eyre::{Result, WrapErr};
use color_eyre::owo_colors::OwoColorize;
use powerbi::types::{ApiUrl, AuthorityUrl, ClientId, Username};
use powerbi::Endpoints;
use serde::{Deserialize, Serialize};
use std::path::Path;

const APP_NAME: &str = "pbirs";

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct PbirsConfig {
    pub client_id: Option<ClientId>,
    pub username: Option<Username>,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl PbirsConfig {
    /// Load the configuration file. `path` is for testing purposes only.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => confy::load_path(p),
            None => confy::load(APP_NAME, None),
        }
        .wrap_err("Couldn't load config file")
    }

    pub fn store(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(p) => confy::store_path(p, self),
            None => confy::store(APP_NAME, None, self),
        }
        .wrap_err("Couldn't write config file")
    }

    /// Apply the given values. Returns `true` if anything changed.
    pub fn update(
        &mut self,
        client_id: Option<ClientId>,
        username: Option<Username>,
        api_url: Option<ApiUrl>,
        authority: Option<AuthorityUrl>,
    ) -> bool {
        let before = self.clone();
        if client_id.is_some() {
            self.client_id = client_id;
        }
        if username.is_some() {
            self.username = username;
        }
        if let Some(api_url) = api_url {
            self.endpoints.api_url = api_url;
        }
        if let Some(authority) = authority {
            self.endpoints.authority = authority;
        }
        &before != self
    }
}

/// `pbirs config`: save the given values, or print the configuration if none are given.
pub fn config(
    path: Option<&Path>,
    client_id: Option<ClientId>,
    username: Option<Username>,
    api_url: Option<ApiUrl>,
    authority: Option<AuthorityUrl>,
) -> Result<()> {
    let mut config = PbirsConfig::load(path)?;
    let nothing_given =
        client_id.is_none() && username.is_none() && api_url.is_none() && authority.is_none();
    if nothing_given {
        print_config(&config);
        return Ok(());
    }
    if config.update(client_id, username, api_url, authority) {
        config.store(path)?;
    }
    Ok(())
}

fn print_config(config: &PbirsConfig) {
    let unset = "(not set)";
    println!(
        "client ID: {}",
        config
            .client_id
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| unset.to_string())
            .cyan()
    );
    println!(
        "username:  {}",
        config
            .username
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| unset.to_string())
            .green()
    );
    println!("authority: {}", config.endpoints.authority);
    println!("resource:  {}", config.endpoints.resource);
    println!("API URL:   {}", config.endpoints.api_url);
}
