use aliri_braid::braid;

/// Workspace (group) ID, a GUID.
#[braid(serde)]
pub struct WorkspaceId;

/// Report ID, a GUID.
#[braid(serde)]
pub struct ReportId;

/// Dataset ID, a GUID.
#[braid(serde)]
pub struct DatasetId;

/// Application (client) ID registered with the identity provider.
#[braid(serde)]
pub struct ClientId;
