use crate::errors::InvalidAccessLevel;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Permission granted by an embed token.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum AccessLevel {
    #[default]
    View,
    Edit,
    Create,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::View => "View",
            AccessLevel::Edit => "Edit",
            AccessLevel::Create => "Create",
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = InvalidAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "view" => Ok(AccessLevel::View),
            "edit" => Ok(AccessLevel::Edit),
            "create" => Ok(AccessLevel::Create),
            _ => Err(InvalidAccessLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("View", AccessLevel::View)]
    #[case("view", AccessLevel::View)]
    #[case("EDIT", AccessLevel::Edit)]
    #[case("Create", AccessLevel::Create)]
    fn test_parse(#[case] s: &str, #[case] expected: AccessLevel) {
        assert_eq!(s.parse::<AccessLevel>().unwrap(), expected);
    }

    #[test]
    fn test_reject_unknown() {
        assert!("Admin".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn test_serializes_as_api_expects() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::Edit).unwrap(),
            "\"Edit\""
        );
        assert_eq!(AccessLevel::default(), AccessLevel::View);
    }
}
