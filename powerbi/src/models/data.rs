//! Definitions of structs describing request and response data of the Power BI API.

use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Every listing endpoint wraps its items in `value`.
#[derive(Deserialize)]
pub(crate) struct ValueList<T> {
    pub value: Vec<T>,
}

/// A workspace, called "group" by the API.
#[derive(Debug, Deserialize, Clone)]
pub struct GroupResponse {
    pub id: WorkspaceId,
    pub name: String,
    #[serde(rename = "isReadOnly", default)]
    pub is_read_only: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReportResponse {
    pub id: ReportId,
    pub name: String,
    /// Everything else the API sent, e.g. `webUrl`, `embedUrl`, `datasetId`.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatasetResponse {
    pub id: DatasetId,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Something listed inside a workspace, identified by ID and name.
pub trait Identified {
    /// What to call this kind of thing in messages.
    const KIND: &'static str;
    const LABEL: &'static str;

    fn id_str(&self) -> &str;
    fn name(&self) -> &str;
}

impl Identified for ReportResponse {
    const KIND: &'static str = "report";
    const LABEL: &'static str = "Report";

    fn id_str(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Identified for DatasetResponse {
    const KIND: &'static str = "dataset";
    const LABEL: &'static str = "Dataset";

    fn id_str(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Row-level security identity applied to an embed token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveIdentity {
    pub username: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    pub datasets: Vec<DatasetId>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateTokenRequest<'a> {
    pub access_level: AccessLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identities: Option<&'a [EffectiveIdentity]>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmbedTokenResponse {
    pub token: EmbedToken,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expiration: Option<OffsetDateTime>,
}
