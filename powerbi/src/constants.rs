pub const PBI_AUTHORITY: &str = "https://login.microsoftonline.com/common";
pub const PBI_RESOURCE: &str = "https://analysis.windows.net/powerbi/api";
pub const API_BASE: &str = "https://api.powerbi.com/v1.0/myorg/";

/// Display name of the default workspace, which has no group ID.
pub const DEFAULT_WORKSPACE_NAME: &str = "My workspace";
