//! URL templates of the Power BI REST API.
//!
//! Every collection exists twice: under `groups/{id}/` for a workspace,
//! and directly under the API base for "My workspace".

use crate::types::{ApiUrlRef, ReportIdRef, WorkspaceIdRef};

/// Collections which can be listed per workspace.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Collection {
    Reports,
    Datasets,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Reports => "reports",
            Collection::Datasets => "datasets",
        }
    }
}

/// `groups`, the list of workspaces the user can access.
pub fn groups(base: &ApiUrlRef) -> String {
    format!("{}groups", base)
}

/// Base of a workspace, either `groups/{id}/` or the API base itself.
fn workspace_base(base: &ApiUrlRef, workspace: Option<&WorkspaceIdRef>) -> String {
    match workspace {
        Some(id) => format!("{}groups/{}/", base, id),
        None => base.to_string(),
    }
}

/// List of reports or datasets of a workspace.
pub fn collection(
    base: &ApiUrlRef,
    workspace: Option<&WorkspaceIdRef>,
    collection: Collection,
) -> String {
    format!("{}{}", workspace_base(base, workspace), collection.as_str())
}

/// Embed token endpoint of a report.
pub fn report_token(
    base: &ApiUrlRef,
    workspace: Option<&WorkspaceIdRef>,
    report: &ReportIdRef,
) -> String {
    format!(
        "{}reports/{}/GenerateToken",
        workspace_base(base, workspace),
        report
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiUrl, ReportId, WorkspaceId};
    use rstest::*;

    const WS: &str = "f089354e-8366-4e18-aea3-4cb4a3a50b48";
    const REPORT: &str = "5b218778-e7a5-4d73-8187-f10824047715";

    #[fixture]
    fn base() -> ApiUrl {
        ApiUrl::try_from("https://api.powerbi.com/v1.0/myorg/").unwrap()
    }

    #[rstest]
    fn test_groups(base: ApiUrl) {
        assert_eq!(groups(&base), "https://api.powerbi.com/v1.0/myorg/groups");
    }

    #[rstest]
    #[case(None, Collection::Reports, "https://api.powerbi.com/v1.0/myorg/reports")]
    #[case(None, Collection::Datasets, "https://api.powerbi.com/v1.0/myorg/datasets")]
    #[case(
        Some(WS),
        Collection::Reports,
        "https://api.powerbi.com/v1.0/myorg/groups/f089354e-8366-4e18-aea3-4cb4a3a50b48/reports"
    )]
    #[case(
        Some(WS),
        Collection::Datasets,
        "https://api.powerbi.com/v1.0/myorg/groups/f089354e-8366-4e18-aea3-4cb4a3a50b48/datasets"
    )]
    fn test_collection(
        base: ApiUrl,
        #[case] workspace: Option<&str>,
        #[case] kind: Collection,
        #[case] expected: &str,
    ) {
        let workspace = workspace.map(WorkspaceId::from);
        assert_eq!(collection(&base, workspace.as_deref(), kind), expected);
    }

    #[rstest]
    #[case(
        None,
        "https://api.powerbi.com/v1.0/myorg/reports/5b218778-e7a5-4d73-8187-f10824047715/GenerateToken"
    )]
    #[case(
        Some(WS),
        "https://api.powerbi.com/v1.0/myorg/groups/f089354e-8366-4e18-aea3-4cb4a3a50b48/reports/5b218778-e7a5-4d73-8187-f10824047715/GenerateToken"
    )]
    fn test_report_token(base: ApiUrl, #[case] workspace: Option<&str>, #[case] expected: &str) {
        let workspace = workspace.map(WorkspaceId::from);
        let report = ReportId::from(REPORT);
        assert_eq!(
            report_token(&base, workspace.as_deref(), &report),
            expected
        );
    }
}
