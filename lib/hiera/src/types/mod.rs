//! Record and wire types

mod error;
mod node;
mod role;

pub use error::{ErrorCode, ErrorResponse};
pub use node::{Node, NodeList};
pub use role::{Role, RoleList};
