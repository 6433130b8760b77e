//! 导出结果类型

use std::fmt;

use dnspod_sync_provider::Domain;
use serde::Serialize;

/// Kind of declarative resource an instruction adopts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Domain,
    Record,
}

impl ResourceKind {
    /// Declarative resource type, e.g. `dnspod_record`.
    pub fn resource_type(self) -> &'static str {
        match self {
            Self::Domain => "dnspod_domain",
            Self::Record => "dnspod_record",
        }
    }
}

/// Binds a declarative identifier to an existing remote object.
///
/// Displays as `<identifier> <remote_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdoptInstruction {
    pub kind: ResourceKind,
    pub identifier: String,
    /// `domain_id` for domains, `domain_id:record_id` for records.
    pub remote_id: String,
}

impl AdoptInstruction {
    /// Shell line adopting the object into declarative state.
    pub fn import_command(&self) -> String {
        format!(
            "terraform import {}.{} {}",
            self.kind.resource_type(),
            self.identifier,
            self.remote_id
        )
    }
}

impl fmt::Display for AdoptInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.remote_id)
    }
}

/// Everything exported for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainExport {
    pub domain: Domain,
    /// Declarative identifier of the domain block.
    pub identifier: String,
    /// Declarative text: the domain block, then one block per record.
    pub config: String,
    /// Domain first, then records in listing order.
    pub instructions: Vec<AdoptInstruction>,
    /// `set -o errexit` followed by one import command per instruction.
    pub script: String,
}

impl DomainExport {
    pub fn config_file_name(&self) -> String {
        format!("dnspod_{}.tf", self.identifier)
    }

    pub fn script_file_name(&self) -> String {
        format!("dnspod_{}.sh", self.identifier)
    }
}
