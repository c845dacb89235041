use crate::selector::{find_report, WorkspaceSelector};
use color_eyre::eyre::{bail, Result};
use powerbi::types::DatasetIdRef;
use powerbi::{AccessLevel, EffectiveIdentity, PowerBiClient};

/// A row-level security identity given as `USERNAME[:ROLE,ROLE...]`,
/// before the dataset it applies to is known. The roles follow the last `:`,
/// so a username may itself contain `:` as long as a role list is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityArg {
    pub username: String,
    pub roles: Vec<String>,
}

impl std::str::FromStr for IdentityArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (username, roles) = match s.rsplit_once(':') {
            Some((u, r)) => (u, r),
            None => (s, ""),
        };
        if username.is_empty() {
            return Err(format!("identity \"{}\" has no username", s));
        }
        let roles = roles
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
        Ok(Self {
            username: username.to_string(),
            roles,
        })
    }
}

/// `pbirs token`: print an embed token for a report.
pub fn token(
    client: &PowerBiClient,
    query: &str,
    selector: Option<&WorkspaceSelector>,
    access_level: AccessLevel,
    identities: Vec<IdentityArg>,
) -> Result<()> {
    let report = find_report(client, query, selector)?;
    let identities = scope_identities(identities, report.dataset_id(), report.name())?;
    let res = report.generate_token(access_level, identities.as_deref())?;
    if let Some(expiration) = res.expiration {
        log::info!("embed token for {} expires at {}", report, expiration);
    }
    println!("{}", res.token);
    Ok(())
}

/// Apply every identity to the report's dataset. `None` if no identities were given.
fn scope_identities(
    identities: Vec<IdentityArg>,
    dataset: Option<&DatasetIdRef>,
    report_name: &str,
) -> Result<Option<Vec<EffectiveIdentity>>> {
    if identities.is_empty() {
        return Ok(None);
    }
    let dataset = match dataset {
        Some(id) => id.to_owned(),
        None => bail!("Report \"{}\" has no dataset to apply identities to", report_name),
    };
    let identities = identities
        .into_iter()
        .map(|i| EffectiveIdentity {
            username: i.username,
            roles: i.roles,
            datasets: vec![dataset.clone()],
        })
        .collect();
    Ok(Some(identities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("john@contoso.com", "john@contoso.com", &[])]
    #[case("john@contoso.com:sales", "john@contoso.com", &["sales"])]
    #[case("john@contoso.com:sales, east", "john@contoso.com", &["sales", "east"])]
    #[case("john@contoso.com:", "john@contoso.com", &[])]
    #[case("urn:user:42:sales", "urn:user:42", &["sales"])]
    fn test_parse_identity(#[case] s: &str, #[case] username: &str, #[case] roles: &[&str]) {
        let parsed: IdentityArg = s.parse().unwrap();
        assert_eq!(parsed.username, username);
        assert_eq!(parsed.roles, roles);
    }

    #[rstest]
    #[case("")]
    #[case(":sales")]
    fn test_reject_identity_without_username(#[case] s: &str) {
        assert!(s.parse::<IdentityArg>().is_err());
    }

    #[test]
    fn test_no_identities_needs_no_dataset() {
        assert!(scope_identities(vec![], None, "Sales").unwrap().is_none());
    }

    #[test]
    fn test_identities_are_scoped_to_dataset() {
        let dataset = DatasetIdRef::from_str("cfafbeb1-8037-4d0c-896e-a46fb27ff229");
        let identities = vec![
            "john@contoso.com:sales,east".parse().unwrap(),
            "jane@contoso.com".parse().unwrap(),
        ];
        let scoped = scope_identities(identities, Some(dataset), "Sales")
            .unwrap()
            .unwrap();
        assert_eq!(scoped.len(), 2);
        assert_eq!(scoped[0].username, "john@contoso.com");
        assert_eq!(scoped[0].roles, vec!["sales", "east"]);
        assert!(scoped[1].roles.is_empty());
        assert!(scoped.iter().all(|i| i.datasets == vec![dataset.to_owned()]));
    }

    #[test]
    fn test_identities_without_dataset_is_error() {
        let identities = vec!["john@contoso.com".parse().unwrap()];
        let e = scope_identities(identities, None, "Sales").unwrap_err();
        assert!(e.to_string().contains("Sales"));
    }
}
