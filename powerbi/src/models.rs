//! Representations of data from the Power BI API.
//!
//! ## How It Works
//!
//! [data] is where the API response data are defined as [serde::de::Deserialize]-able types.
//! Reports and datasets live inside a workspace, and a workspace is reached
//! through a [crate::PowerBiClient].
//! [linked] defines [WorkspaceItem], which pairs a response struct from [data] with
//! the [Workspace] it was listed from. Associated methods are defined on specific
//! wrapped objects, e.g. [Report] can request embed tokens.

pub mod data;
pub mod linked;
mod report;
mod workspace;

pub use data::*;
pub use linked::*;
pub use workspace::Workspace;
