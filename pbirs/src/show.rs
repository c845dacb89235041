use crate::selector::{find_report, WorkspaceSelector};
use color_eyre::eyre::Result;
use color_eyre::owo_colors::OwoColorize;
use powerbi::PowerBiClient;
use serde_json::{json, Value};

/// `pbirs report`: print a report and all of its attributes.
pub fn report(
    client: &PowerBiClient,
    query: &str,
    selector: Option<&WorkspaceSelector>,
    as_json: bool,
) -> Result<()> {
    let report = find_report(client, query, selector)?;
    if as_json {
        let mut object = json!({
            "id": report.id().as_str(),
            "name": report.name(),
            "workspaceId": report.workspace().id().map(|id| id.as_str()),
        });
        if let Value::Object(map) = &mut object {
            map.extend(report.attributes().clone());
        }
        println!("{}", serde_json::to_string_pretty(&object)?);
        return Ok(());
    }
    println!("{}", report.bold());
    println!("{}", report.workspace().dimmed());
    for (key, value) in report.attributes() {
        match value {
            Value::String(s) => println!("  {}: {}", key.cyan(), s),
            other => println!("  {}: {}", key.cyan(), other),
        }
    }
    Ok(())
}
