use super::data::{EffectiveIdentity, EmbedTokenResponse, GenerateTokenRequest};
use super::linked::{Dataset, Report};
use crate::errors::PowerBiError;
use crate::routes;
use crate::types::{AccessLevel, DatasetIdRef, EmbedToken, ReportIdRef};
use serde_json::{Map, Value};

impl<'a> Report<'a> {
    pub fn id(&self) -> &ReportIdRef {
        &self.object.id
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// Attributes of the report other than `id` and `name`, as sent by the API.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.object.attributes
    }

    /// Get an attribute by its API name, e.g. `"reportType"`.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.object.attributes.get(key)
    }

    pub fn web_url(&self) -> Option<&str> {
        self.str_attribute("webUrl")
    }

    pub fn embed_url(&self) -> Option<&str> {
        self.str_attribute("embedUrl")
    }

    /// ID of the dataset this report reads from.
    pub fn dataset_id(&self) -> Option<&DatasetIdRef> {
        self.str_attribute("datasetId").map(DatasetIdRef::from_str)
    }

    fn str_attribute(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Value::as_str)
    }

    /// Get the dataset of this report from the same workspace.
    pub fn get_dataset(&self) -> Result<Option<Dataset<'a>>, PowerBiError> {
        match self.dataset_id() {
            Some(id) => self.workspace.get_dataset_by_id(id),
            None => Ok(None),
        }
    }

    /// Generate an embed token for viewing (or editing) this report.
    ///
    /// `identities` restricts what the token holder can see with row-level security.
    pub fn get_token(
        &self,
        access_level: AccessLevel,
        identities: Option<&[EffectiveIdentity]>,
    ) -> Result<EmbedToken, PowerBiError> {
        self.generate_token(access_level, identities)
            .map(|res| res.token)
    }

    /// Same as [Report::get_token] but keeps the token's ID and expiration.
    pub fn generate_token(
        &self,
        access_level: AccessLevel,
        identities: Option<&[EffectiveIdentity]>,
    ) -> Result<EmbedTokenResponse, PowerBiError> {
        let client = self.client();
        let url = routes::report_token(client.api_url(), self.workspace.id(), self.id());
        client.post_json(
            &url,
            &GenerateTokenRequest {
                access_level,
                identities,
            },
        )
    }
}
