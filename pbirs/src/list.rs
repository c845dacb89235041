use crate::selector::{self, WorkspaceSelector};
use color_eyre::eyre::Result;
use color_eyre::owo_colors::OwoColorize;
use powerbi::{PowerBiClient, Workspace};

/// `pbirs workspaces`
pub fn workspaces(client: &PowerBiClient) -> Result<()> {
    for workspace in client.get_workspaces()? {
        let id = workspace
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "default".to_string());
        if workspace.is_read_only() {
            println!("{}  {} {}", id.cyan(), workspace.name().bold(), "(read-only)".dimmed());
        } else {
            println!("{}  {}", id.cyan(), workspace.name().bold());
        }
    }
    Ok(())
}

/// `pbirs reports`
pub fn reports(client: &PowerBiClient, selector: Option<&WorkspaceSelector>) -> Result<()> {
    for workspace in selector::workspaces(client, selector)? {
        for report in workspace.get_reports()? {
            print_row(report.id().as_str(), report.name(), &workspace);
        }
    }
    Ok(())
}

/// `pbirs datasets`
pub fn datasets(client: &PowerBiClient, selector: Option<&WorkspaceSelector>) -> Result<()> {
    for workspace in selector::workspaces(client, selector)? {
        for dataset in workspace.get_datasets()? {
            print_row(dataset.id().as_str(), dataset.name(), &workspace);
        }
    }
    Ok(())
}

fn print_row(id: &str, name: &str, workspace: &Workspace) {
    println!("{}  {}  {}", id.cyan(), name.green(), workspace.name().dimmed());
}
