use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of ZFS resource a record describes.
///
/// The kind is fixed at construction and selects both the default field
/// schema used for parsing and the remote collection the resource is
/// reported into. Being a closed enum, every match over it is
/// exhaustive; there is no "unknown kind" path to mis-route data down.
///
/// # Examples
///
/// ```
/// use zfsmon_common::types::ResourceKind;
///
/// let kind: ResourceKind = "pool".parse().unwrap();
/// assert_eq!(kind, ResourceKind::Pool);
/// assert_eq!(kind.collection(), "pools");
/// assert_eq!(ResourceKind::Mount.to_string(), "mount");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pool,
    Mount,
}

impl ResourceKind {
    /// The remote collection this kind is reported into.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Pool => "pools",
            ResourceKind::Mount => "mounts",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Pool => write!(f, "pool"),
            ResourceKind::Mount => write!(f, "mount"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pool" => Ok(ResourceKind::Pool),
            "mount" => Ok(ResourceKind::Mount),
            _ => Err(format!("unknown resource kind: {s}")),
        }
    }
}

/// A single parsed property value.
///
/// Size-typed fields that convert cleanly become [`PropertyValue::Bytes`];
/// everything else, including size fields whose text failed conversion,
/// stays [`PropertyValue::Text`]. Both serialize to their string form on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Bytes(u64),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<u64> {
        match self {
            PropertyValue::Text(_) => None,
            PropertyValue::Bytes(n) => Some(*n),
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{s}"),
            PropertyValue::Bytes(n) => write!(f, "{n}"),
        }
    }
}

/// An ordered field-name → value mapping parsed from one listing line.
///
/// Iteration order is the schema order the record was built in. The
/// record never contains a key outside the schema that governed its
/// construction, and is not mutated after the collection layer hands it
/// off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRecord {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: PropertyValue) {
        self.entries.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&PropertyValue> {
        self.entries.get(field)
    }

    /// The identifying `name` field, when present and textual.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(PropertyValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The record as form-encodable key/value pairs, in schema order.
    /// Field names and values round-trip as strings.
    pub fn form_pairs(&self) -> Vec<(&str, String)> {
        self.iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}
