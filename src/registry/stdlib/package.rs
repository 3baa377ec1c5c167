//! A single stdlib package's members (§6.1): function return types and
//! exported type names, keyed by the member's bare name within the
//! package.

use serde::{Deserialize, Serialize};

/// One exported member of a stdlib package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageMember {
    pub name: String,
    /// FQN of the member's type if it's a value/function; a constructed
    /// type's FQN if it's a class/struct.
    pub type_fqn: String,
    pub is_callable: bool,
}

/// A stdlib package's full export surface, as served by the CDN.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub import_path: String,
    pub members: Vec<PackageMember>,
}

impl Package {
    pub fn member(&self, name: &str) -> Option<&PackageMember> {
        self.members.iter().find(|m| m.name == name)
    }
}
