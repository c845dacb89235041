//! Structs which represent Power BI resources connected to the workspace they belong to.

use super::data::{DatasetResponse, Identified, ReportResponse};
use super::workspace::Workspace;
use crate::types::DatasetIdRef;
use crate::PowerBiClient;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// A resource listed from a [Workspace]. It can reach the rest of the API
/// through its workspace, e.g. a [Report] can request embed tokens.
#[derive(Debug, Clone)]
pub struct WorkspaceItem<'a, T> {
    pub(crate) workspace: Workspace<'a>,
    pub object: T,
}

pub type Report<'a> = WorkspaceItem<'a, ReportResponse>;
pub type Dataset<'a> = WorkspaceItem<'a, DatasetResponse>;

impl<'a, T> WorkspaceItem<'a, T> {
    pub(crate) fn new(workspace: Workspace<'a>, object: T) -> Self {
        Self { workspace, object }
    }

    /// The workspace this item was listed from.
    pub fn workspace(&self) -> &Workspace<'a> {
        &self.workspace
    }

    pub(crate) fn client(&self) -> &'a PowerBiClient {
        self.workspace.client
    }
}

impl<T: Identified> Display for WorkspaceItem<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ID: {} Name: {}",
            T::LABEL,
            self.object.id_str(),
            self.object.name()
        )
    }
}

impl Dataset<'_> {
    pub fn id(&self) -> &DatasetIdRef {
        &self.object.id
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// Attributes of the dataset other than `id` and `name`, as sent by the API.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.object.attributes
    }
}
