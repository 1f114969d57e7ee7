//! Role records

use serde::{Deserialize, Serialize};

use crate::error::HieraError;
use crate::registry::Record;

/// A role, named after the class that configures it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RoleFields")]
pub struct Role {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RoleFields {
    #[serde(default)]
    name: String,
}

impl TryFrom<RoleFields> for Role {
    type Error = HieraError;

    fn try_from(fields: RoleFields) -> Result<Self, Self::Error> {
        Role::new(fields.name)
    }
}

impl Role {
    pub fn new(name: impl Into<String>) -> Result<Self, HieraError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HieraError::EmptyField("name"));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Role {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Response body for listing roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleList {
    pub roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_role() {
        let role = Role::new("role::testing").unwrap();
        assert_eq!(role.name(), "role::testing");
    }

    #[test]
    fn test_new_role_empty_name() {
        let err = Role::new("").unwrap_err();
        assert!(matches!(err, HieraError::EmptyField("name")));
    }

    #[test]
    fn test_deserialize_rejects_missing_name() {
        assert!(serde_json::from_str::<Role>("{}").is_err());
        let role: Role = serde_json::from_str(r#"{"Name":"role::www"}"#).unwrap();
        assert_eq!(role.name(), "role::www");
    }
}
