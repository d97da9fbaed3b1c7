//! Serde targets for the node/link workflow JSON.
//!
//! The format carries no schema version and many producers emit it, so every
//! optional field decodes leniently: a value of the wrong shape degrades to the
//! field's default instead of rejecting the whole node.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// IDS
// =============================================================================

/// Node or link identifier. Usually an integer; some exporters write strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(
                n.as_i64()
                    .map(RecordId::Int)
                    .unwrap_or_else(|| RecordId::Str(n.to_string())),
            ),
            Value::String(s) => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Str(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Position { x, y }
    }
}

impl From<[f64; 2]> for Size {
    fn from([width, height]: [f64; 2]) -> Self {
        Size { width, height }
    }
}

// =============================================================================
// NODES
// =============================================================================

/// One operation instance. `widgets_values` is positional and its meaning is
/// defined by `type` alone; nothing at this layer knows the per-type schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: RecordId,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub node_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "pair")]
    pub pos: Option<[f64; 2]>,
    #[serde(default, deserialize_with = "pair")]
    pub size: Option<[f64; 2]>,
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub widgets_values: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub inputs: Vec<PortRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub outputs: Vec<PortRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<i64>,
}

impl NodeRecord {
    /// The `type` string, or `""` when the record has none.
    pub fn type_name(&self) -> &str {
        self.node_type.as_deref().unwrap_or("")
    }

    /// Display label: a non-empty `title`, falling back to `type`.
    pub fn label(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => self.type_name(),
        }
    }
}

/// An input (`link`) or output (`links`) slot on a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub port_type: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub link: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Value>>,
}

// =============================================================================
// LINKS
// =============================================================================

/// A link as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinkRecord {
    /// `[linkId, sourceNodeId, sourceSlot, targetNodeId, targetSlot, dataType]`
    Tuple(Vec<Value>),
    Object(LinkObject),
}

/// Object-form link. Accepts both the legacy `from_node`/`to_input` naming and
/// the `origin_id`/`target_slot` naming of newer exports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkObject {
    #[serde(default, alias = "link_id")]
    pub id: Option<Value>,
    #[serde(default, alias = "origin_id")]
    pub from_node: Option<Value>,
    #[serde(default, alias = "origin_slot")]
    pub from_output: Option<Value>,
    #[serde(default, alias = "target_id")]
    pub to_node: Option<Value>,
    #[serde(default, alias = "target_slot")]
    pub to_input: Option<Value>,
    #[serde(rename = "type", default)]
    pub data_type: Option<Value>,
}

/// Canonical link shape consumed by every analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: Option<RecordId>,
    pub source: Option<RecordId>,
    pub source_slot: Option<Value>,
    pub target: Option<RecordId>,
    pub target_slot: Option<Value>,
    /// Name of the input port at the target end, when it can be resolved.
    pub target_input: Option<String>,
    pub data_type: Option<String>,
}

impl LinkRecord {
    /// Resolve into the canonical shape. `target_node` is the node the link
    /// points at, used to turn a numeric target slot into its port name.
    pub fn canonicalize(&self, target_node: Option<&NodeRecord>) -> Link {
        let (id, source, source_slot, target, target_slot, data_type) = match self {
            LinkRecord::Tuple(items) => (
                items.first(),
                items.get(1),
                items.get(2),
                items.get(3),
                items.get(4),
                items.get(5),
            ),
            LinkRecord::Object(obj) => (
                obj.id.as_ref(),
                obj.from_node.as_ref(),
                obj.from_output.as_ref(),
                obj.to_node.as_ref(),
                obj.to_input.as_ref(),
                obj.data_type.as_ref(),
            ),
        };

        let target_slot = target_slot.filter(|v| !v.is_null());

        Link {
            id: id.and_then(RecordId::from_value),
            source: source.and_then(RecordId::from_value),
            source_slot: source_slot.filter(|v| !v.is_null()).cloned(),
            target: target.and_then(RecordId::from_value),
            target_input: resolve_port_name(target_slot, target_node),
            target_slot: target_slot.cloned(),
            data_type: data_type.and_then(Value::as_str).map(str::to_string),
        }
    }

    /// Target node id as written, before canonicalization.
    pub fn target_ref(&self) -> Option<RecordId> {
        match self {
            LinkRecord::Tuple(items) => items.get(3).and_then(RecordId::from_value),
            LinkRecord::Object(obj) => obj.to_node.as_ref().and_then(RecordId::from_value),
        }
    }
}

fn resolve_port_name(slot: Option<&Value>, target_node: Option<&NodeRecord>) -> Option<String> {
    match slot? {
        Value::String(name) => Some(name.clone()),
        Value::Number(n) => {
            let index = usize::try_from(n.as_u64()?).ok()?;
            target_node?
                .inputs
                .get(index)
                .map(|port| port.name.clone())
                .filter(|name| !name.is_empty())
        }
        _ => None,
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A decoded workflow: nodes in document order plus canonical links.
#[derive(Debug, Clone, Default)]
pub struct WorkflowDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<Link>,
}

// =============================================================================
// LENIENT DECODING HELPERS
// =============================================================================

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// `[a, b]` or `{"0": a, "1": b}`; anything else decodes as absent.
fn pair<'de, D>(deserializer: D) -> Result<Option<[f64; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let (a, b) = match &value {
        Value::Array(items) => (items.first(), items.get(1)),
        Value::Object(map) => (map.get("0"), map.get("1")),
        _ => return Ok(None),
    };
    Ok(match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(a), Some(b)) => Some([a, b]),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_defaults_when_optional_fields_absent() {
        let node: NodeRecord = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(node.id, RecordId::Int(7));
        assert_eq!(node.type_name(), "");
        assert!(node.widgets_values.is_empty());
        assert!(node.properties.is_empty());
        assert!(node.pos.is_none());
    }

    #[test]
    fn malformed_optional_fields_degrade() {
        let node: NodeRecord = serde_json::from_value(json!({
            "id": "a1",
            "type": "KSampler",
            "properties": null,
            "widgets_values": { "seed": 1 },
            "inputs": "nope",
            "order": "first",
            "pos": { "0": 10.5, "1": -3 }
        }))
        .unwrap();
        assert_eq!(node.id, RecordId::Str("a1".into()));
        assert!(node.properties.is_empty());
        assert!(node.widgets_values.is_empty());
        assert!(node.inputs.is_empty());
        assert_eq!(node.order, None);
        assert_eq!(node.pos, Some([10.5, -3.0]));
    }

    #[test]
    fn label_falls_back_to_type() {
        let node: NodeRecord =
            serde_json::from_value(json!({ "id": 1, "type": "VAEDecode", "title": "" })).unwrap();
        assert_eq!(node.label(), "VAEDecode");
    }

    #[test]
    fn tuple_link_resolves_target_port_name() {
        let target: NodeRecord = serde_json::from_value(json!({
            "id": 6,
            "type": "KSampler",
            "inputs": [
                { "name": "model", "type": "MODEL", "link": 3 },
                { "name": "positive", "type": "CONDITIONING", "link": 6 }
            ]
        }))
        .unwrap();
        let record: LinkRecord =
            serde_json::from_value(json!([6, 3, 0, 6, 1, "CONDITIONING"])).unwrap();
        let link = record.canonicalize(Some(&target));
        assert_eq!(link.id, Some(RecordId::Int(6)));
        assert_eq!(link.source, Some(RecordId::Int(3)));
        assert_eq!(link.target_input.as_deref(), Some("positive"));
        assert_eq!(link.data_type.as_deref(), Some("CONDITIONING"));
    }

    #[test]
    fn object_link_keeps_named_input() {
        let record: LinkRecord = serde_json::from_value(json!({
            "from_node": 4, "from_output": 0, "to_node": 9, "to_input": "negative"
        }))
        .unwrap();
        let link = record.canonicalize(None);
        assert_eq!(link.source, Some(RecordId::Int(4)));
        assert_eq!(link.target, Some(RecordId::Int(9)));
        assert_eq!(link.target_input.as_deref(), Some("negative"));
        assert_eq!(link.id, None);
    }

    #[test]
    fn origin_target_naming_is_accepted() {
        let record: LinkRecord = serde_json::from_value(json!({
            "id": 12, "origin_id": 2, "origin_slot": 0, "target_id": 5, "target_slot": 0, "type": "LATENT"
        }))
        .unwrap();
        let link = record.canonicalize(None);
        assert_eq!(link.id, Some(RecordId::Int(12)));
        assert_eq!(link.target, Some(RecordId::Int(5)));
        assert_eq!(link.target_input, None);
    }
}
