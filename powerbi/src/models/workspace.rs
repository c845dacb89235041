use super::data::{DatasetResponse, GroupResponse, ReportResponse};
use super::linked::{Dataset, Report, WorkspaceItem};
use crate::constants::DEFAULT_WORKSPACE_NAME;
use crate::errors::PowerBiError;
use crate::routes::{self, Collection};
use crate::types::{DatasetIdRef, ReportIdRef, WorkspaceId, WorkspaceIdRef};
use crate::PowerBiClient;
use serde::de::DeserializeOwned;
use std::fmt::{Display, Formatter};

/// A workspace (group) of reports and datasets.
///
/// The default workspace ("My workspace") has no ID.
#[derive(Debug, Clone)]
pub struct Workspace<'a> {
    pub(crate) client: &'a PowerBiClient,
    id: Option<WorkspaceId>,
    name: String,
    is_read_only: bool,
}

impl<'a> Workspace<'a> {
    /// The user's own workspace.
    pub(crate) fn default_workspace(client: &'a PowerBiClient) -> Self {
        Self {
            client,
            id: None,
            name: DEFAULT_WORKSPACE_NAME.to_string(),
            is_read_only: false,
        }
    }

    pub(crate) fn from_group(client: &'a PowerBiClient, group: GroupResponse) -> Self {
        Self {
            client,
            id: Some(group.id),
            name: group.name,
            is_read_only: group.is_read_only,
        }
    }

    /// Workspace ID, `None` for "My workspace".
    pub fn id(&self) -> Option<&WorkspaceIdRef> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    pub fn is_default(&self) -> bool {
        self.id.is_none()
    }

    pub fn get_reports(&self) -> Result<Vec<Report<'a>>, PowerBiError> {
        self.get_items(Collection::Reports)
    }

    pub fn get_datasets(&self) -> Result<Vec<Dataset<'a>>, PowerBiError> {
        self.get_items(Collection::Datasets)
    }

    /// First report with the given ID.
    pub fn get_report_by_id(&self, id: &ReportIdRef) -> Result<Option<Report<'a>>, PowerBiError> {
        self.find(Collection::Reports, |r: &ReportResponse| r.id.as_str() == id.as_str())
    }

    /// First report with the given name.
    pub fn get_report_by_name(&self, name: &str) -> Result<Option<Report<'a>>, PowerBiError> {
        self.find(Collection::Reports, |r: &ReportResponse| r.name == name)
    }

    /// First dataset with the given ID.
    pub fn get_dataset_by_id(
        &self,
        id: &DatasetIdRef,
    ) -> Result<Option<Dataset<'a>>, PowerBiError> {
        self.find(Collection::Datasets, |d: &DatasetResponse| d.id.as_str() == id.as_str())
    }

    /// First dataset with the given name.
    pub fn get_dataset_by_name(&self, name: &str) -> Result<Option<Dataset<'a>>, PowerBiError> {
        self.find(Collection::Datasets, |d: &DatasetResponse| d.name == name)
    }

    fn get_items<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<WorkspaceItem<'a, T>>, PowerBiError> {
        let url = routes::collection(self.client.api_url(), self.id(), collection);
        let items: Vec<T> = self.client.get_values(&url)?;
        Ok(items
            .into_iter()
            .map(|object| WorkspaceItem::new(self.clone(), object))
            .collect())
    }

    fn find<T: DeserializeOwned>(
        &self,
        collection: Collection,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Option<WorkspaceItem<'a, T>>, PowerBiError> {
        let items = self.get_items::<T>(collection)?;
        Ok(items.into_iter().find(|item| predicate(&item.object)))
    }
}

impl Display for Workspace<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "Workspace ID: {} Name: {}", id, &self.name),
            None => write!(f, "Workspace ID: Default Name: {}", DEFAULT_WORKSPACE_NAME),
        }
    }
}
