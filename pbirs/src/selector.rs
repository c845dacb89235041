//! Resolving workspaces and reports from what users type.

use color_eyre::eyre::{self, bail, eyre};
use powerbi::types::ReportId;
use powerbi::{PowerBiClient, Report, Workspace};
use std::convert::Infallible;
use std::str::FromStr;

/// A workspace given on the command line: its ID, its name, or one of
/// `default`/`me` for "My workspace".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceSelector {
    Default,
    IdOrName(String),
}

impl FromStr for WorkspaceSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "me" => Ok(Self::Default),
            _ => Ok(Self::IdOrName(s.to_string())),
        }
    }
}

impl WorkspaceSelector {
    /// Find the workspace. IDs take precedence over names.
    pub fn resolve<'a>(&self, client: &'a PowerBiClient) -> eyre::Result<Workspace<'a>> {
        let workspaces = client.get_workspaces()?;
        let found = match self {
            Self::Default => workspaces.into_iter().find(|w| w.is_default()),
            Self::IdOrName(s) => pick(workspaces, s),
        };
        found.ok_or_else(|| eyre!("Workspace not found: {}", self))
    }
}

impl std::fmt::Display for WorkspaceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str(powerbi::constants::DEFAULT_WORKSPACE_NAME),
            Self::IdOrName(s) => f.write_str(s),
        }
    }
}

fn pick<'a>(workspaces: Vec<Workspace<'a>>, s: &str) -> Option<Workspace<'a>> {
    let by_id = workspaces
        .iter()
        .position(|w| w.id().map(|id| id.as_str() == s).unwrap_or(false));
    let by_name = || workspaces.iter().position(|w| w.name() == s);
    let i = by_id.or_else(by_name)?;
    workspaces.into_iter().nth(i)
}

/// Get the workspaces to operate on: the selected one, or all of them.
pub fn workspaces<'a>(
    client: &'a PowerBiClient,
    selector: Option<&WorkspaceSelector>,
) -> eyre::Result<Vec<Workspace<'a>>> {
    match selector {
        Some(s) => Ok(vec![s.resolve(client)?]),
        None => Ok(client.get_workspaces()?),
    }
}

/// Find a report by ID or name, in the selected workspace or in all of them.
pub fn find_report<'a>(
    client: &'a PowerBiClient,
    query: &str,
    selector: Option<&WorkspaceSelector>,
) -> eyre::Result<Report<'a>> {
    let id = ReportId::from(query);
    let found = if let Some(selector) = selector {
        let workspace = selector.resolve(client)?;
        match workspace.get_report_by_id(&id)? {
            Some(report) => Some(report),
            None => workspace.get_report_by_name(query)?,
        }
    } else {
        match client.get_report_by_id(&id)? {
            Some(report) => Some(report),
            None => client.get_report_by_name(query, None)?,
        }
    };
    match found {
        Some(report) => Ok(report),
        None => bail!("Report not found: {}", query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("default", WorkspaceSelector::Default)]
    #[case("me", WorkspaceSelector::Default)]
    #[case("Finance", WorkspaceSelector::IdOrName("Finance".to_string()))]
    #[case(
        "f089354e-8366-4e18-aea3-4cb4a3a50b48",
        WorkspaceSelector::IdOrName("f089354e-8366-4e18-aea3-4cb4a3a50b48".to_string())
    )]
    fn test_parse_selector(#[case] s: &str, #[case] expected: WorkspaceSelector) {
        assert_eq!(s.parse::<WorkspaceSelector>().unwrap(), expected);
    }

    #[test]
    fn test_display_default() {
        assert_eq!(WorkspaceSelector::Default.to_string(), "My workspace");
    }
}
