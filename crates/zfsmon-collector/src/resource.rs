//! Typed resource objects built from listing lines.

use zfsmon_common::diag::DiagnosticSink;
use zfsmon_common::types::{PropertyRecord, ResourceKind};

use crate::record::parse_record;
use crate::schema;

/// Error returned when a parsed record carries no identifying `name`
/// field, which happens when the source line is shorter than the
/// position of `name` in the schema. A resource with no name cannot be
/// reported, so construction of that one record is abandoned; sibling
/// records are unaffected.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} record has no name field (line {line:?})")]
pub struct MissingNameError {
    pub kind: ResourceKind,
    pub line: String,
}

/// One discovered storage resource: a pool or a mounted filesystem,
/// with its parsed properties.
///
/// Objects are built once per cycle per discovered resource and never
/// mutated afterwards; each cycle re-reports current state in full.
#[derive(Debug, Clone)]
pub struct ResourceObject {
    name: String,
    kind: ResourceKind,
    properties: PropertyRecord,
}

impl ResourceObject {
    /// Builds a pool from one `zpool list -H -o all` line.
    pub fn pool(line: &str, diag: &dyn DiagnosticSink) -> Result<Self, MissingNameError> {
        Self::pool_with_fields(line, schema::POOL_FIELDS, diag)
    }

    /// Like [`ResourceObject::pool`], with an explicit ordered field
    /// sequence replacing the default schema.
    pub fn pool_with_fields(
        line: &str,
        fields: &[&str],
        diag: &dyn DiagnosticSink,
    ) -> Result<Self, MissingNameError> {
        Self::from_line(line, ResourceKind::Pool, fields, schema::POOL_SIZE_FIELDS, diag)
    }

    /// Builds a mount from one `zfs list -H -o all` line. Set
    /// `snapshot` when the line came from a `-t snapshot` listing.
    pub fn mount(
        line: &str,
        snapshot: bool,
        diag: &dyn DiagnosticSink,
    ) -> Result<Self, MissingNameError> {
        Self::mount_with_fields(line, snapshot, schema::MOUNT_FIELDS, diag)
    }

    /// Like [`ResourceObject::mount`], with an explicit ordered field
    /// sequence replacing the default schema.
    pub fn mount_with_fields(
        line: &str,
        snapshot: bool,
        fields: &[&str],
        diag: &dyn DiagnosticSink,
    ) -> Result<Self, MissingNameError> {
        // `zfs list -t snapshot -o all` emits one extra trailing column
        // that the plain listing does not; nothing in it is consumed
        // here, so drop it and the positional parse lines up again.
        let adjusted;
        let line = if snapshot {
            let mut columns: Vec<&str> = line.split('\t').collect();
            columns.pop();
            adjusted = columns.join("\t");
            adjusted.as_str()
        } else {
            line
        };
        Self::from_line(line, ResourceKind::Mount, fields, schema::MOUNT_SIZE_FIELDS, diag)
    }

    fn from_line(
        line: &str,
        kind: ResourceKind,
        fields: &[&str],
        size_fields: &[&str],
        diag: &dyn DiagnosticSink,
    ) -> Result<Self, MissingNameError> {
        let properties = parse_record(line, fields, size_fields, diag);
        let name = match properties.name() {
            Some(name) => name.to_string(),
            None => {
                return Err(MissingNameError {
                    kind,
                    line: line.to_string(),
                })
            }
        };
        Ok(Self {
            name,
            kind,
            properties,
        })
    }

    /// The identifying name the resource is reported under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn properties(&self) -> &PropertyRecord {
        &self.properties
    }
}
