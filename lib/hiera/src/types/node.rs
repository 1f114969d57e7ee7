//! Node records

use serde::{Deserialize, Serialize};

use crate::error::HieraError;
use crate::registry::Record;

/// A managed host and the role it is assigned to.
///
/// Both fields are always non-empty. Deserialization goes through
/// [`Node::new`], so bodies and files with a missing or empty field are
/// rejected instead of producing a half-filled node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "NodeFields")]
pub struct Node {
    name: String,
    role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NodeFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: String,
}

impl TryFrom<NodeFields> for Node {
    type Error = HieraError;

    fn try_from(fields: NodeFields) -> Result<Self, Self::Error> {
        Node::new(fields.name, fields.role)
    }
}

impl Node {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Result<Self, HieraError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HieraError::EmptyField("name"));
        }
        let role = role.into();
        if role.is_empty() {
            return Err(HieraError::EmptyField("role"));
        }
        Ok(Self { name, role })
    }

    /// Unique identifier, usually the node's FQDN.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl Record for Node {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Response body for listing nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeList {
    pub nodes: Vec<Node>,
}
