//! Schema declarations
//!
//! Each resource declares its attributes (type, required/optional/computed,
//! defaults, diff suppression). The host reads the schema to validate
//! configuration; the provider uses it to fill defaults before decoding and
//! to decide which attribute changes are real during planning.

use super::common::{suppress_case, suppress_json, suppress_spaces};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Value type of an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "element", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Float,
    Bool,
    List(Box<AttributeType>),
    /// Unordered collection; order never counts as a change
    Set(Box<AttributeType>),
    Map(Box<AttributeType>),
    /// Repeated nested block
    BlockList(Box<Block>),
    /// At most one nested block
    BlockSingle(Box<Block>),
}

impl AttributeType {
    pub fn list(element: AttributeType) -> Self {
        Self::List(Box::new(element))
    }

    pub fn set(element: AttributeType) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(element: AttributeType) -> Self {
        Self::Map(Box::new(element))
    }

    pub fn blocks(block: Block) -> Self {
        Self::BlockList(Box::new(block))
    }

    pub fn block(block: Block) -> Self {
        Self::BlockSingle(Box::new(block))
    }
}

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Required,
    Optional,
    /// Set by the provider only
    Computed,
    /// Configurable; the provider fills it when left out
    OptionalComputed,
}

/// Differences between old and new values that do not count as changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSuppress {
    /// Leading/trailing whitespace is ignored
    TrimSpaces,
    /// Letter case is ignored
    IgnoreCase,
    /// Formatting and key order of a JSON document are ignored
    JsonEquivalent,
}

impl DiffSuppress {
    pub fn suppresses(&self, old: &str, new: &str) -> bool {
        match self {
            DiffSuppress::TrimSpaces => suppress_spaces(old, new),
            DiffSuppress::IgnoreCase => suppress_case(old, new),
            DiffSuppress::JsonEquivalent => suppress_json(old, new),
        }
    }
}

/// One attribute of a block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub constraint: Constraint,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Environment variable consulted when the attribute is left out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_default: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_suppress: Option<DiffSuppress>,
}

impl Attribute {
    fn new(attr_type: AttributeType, constraint: Constraint) -> Self {
        Self {
            attr_type,
            constraint,
            description: String::new(),
            default: None,
            env_default: None,
            force_new: false,
            sensitive: false,
            diff_suppress: None,
        }
    }

    pub fn required(attr_type: AttributeType) -> Self {
        Self::new(attr_type, Constraint::Required)
    }

    pub fn optional(attr_type: AttributeType) -> Self {
        Self::new(attr_type, Constraint::Optional)
    }

    pub fn computed(attr_type: AttributeType) -> Self {
        Self::new(attr_type, Constraint::Computed)
    }

    pub fn optional_computed(attr_type: AttributeType) -> Self {
        Self::new(attr_type, Constraint::OptionalComputed)
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_env_default(mut self, variable: &'static str) -> Self {
        self.env_default = Some(variable);
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn suppress_diff(mut self, suppress: DiffSuppress) -> Self {
        self.diff_suppress = Some(suppress);
        self
    }

    /// Value to use when the attribute is missing from configuration
    fn default_value(&self) -> Option<Value> {
        if let Some(variable) = self.env_default {
            if let Ok(value) = std::env::var(variable) {
                if !value.is_empty() {
                    return Some(Value::String(value));
                }
            }
        }
        self.default.clone()
    }

    /// Whether `old` and `new` are the same once diff suppression and
    /// set ordering are taken into account
    pub fn equivalent(&self, old: &Value, new: &Value) -> bool {
        equivalent_values(&self.attr_type, self.diff_suppress, old, new)
    }
}

/// A group of attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    /// Fill defaults for missing or null attributes, recursing into nested blocks
    pub fn apply_defaults(&self, value: &mut Value) {
        let Value::Object(map) = value else {
            return;
        };

        for (name, attribute) in &self.attributes {
            let missing = map.get(name).map(Value::is_null).unwrap_or(true);
            if missing {
                if let Some(default) = attribute.default_value() {
                    map.insert(name.clone(), default);
                }
            }

            match (&attribute.attr_type, map.get_mut(name)) {
                (AttributeType::BlockList(block), Some(Value::Array(items))) => {
                    for item in items {
                        block.apply_defaults(item);
                    }
                }
                (AttributeType::BlockSingle(block), Some(item @ Value::Object(_))) => {
                    block.apply_defaults(item);
                }
                _ => {}
            }
        }
    }

    /// Names of required attributes missing from `value`, with nested paths
    pub fn missing_required(&self, value: &Value) -> Vec<String> {
        let mut missing = Vec::new();
        self.collect_missing("", value, &mut missing);
        missing
    }

    fn collect_missing(&self, prefix: &str, value: &Value, missing: &mut Vec<String>) {
        let empty = Map::new();
        let map = value.as_object().unwrap_or(&empty);

        for (name, attribute) in &self.attributes {
            let path = format!("{}{}", prefix, name);
            let field = map.get(name).unwrap_or(&Value::Null);

            if attribute.constraint == Constraint::Required && field.is_null() {
                missing.push(path);
                continue;
            }

            match (&attribute.attr_type, field) {
                (AttributeType::BlockList(block), Value::Array(items)) => {
                    for (index, item) in items.iter().enumerate() {
                        block.collect_missing(&format!("{}.{}.", path, index), item, missing);
                    }
                }
                (AttributeType::BlockSingle(block), item @ Value::Object(_)) => {
                    block.collect_missing(&format!("{}.", path), item, missing);
                }
                _ => {}
            }
        }
    }
}

/// Versioned schema of a resource or of the provider itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub version: u32,
    pub block: Block,
}

/// Outcome of comparing prior state with proposed configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Attributes whose value changes
    pub changed: Vec<String>,
    /// Changed attributes that cannot be updated in place
    pub requires_replace: Vec<String>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

impl Schema {
    pub fn new(version: u32, block: Block) -> Self {
        Self { version, block }
    }

    /// Compare top-level attributes of `prior` and `proposed`.
    /// Without prior state every configured attribute is a change.
    pub fn plan(&self, prior: Option<&Value>, proposed: &Value) -> Plan {
        let mut plan = Plan::default();

        for (name, attribute) in &self.block.attributes {
            if attribute.constraint == Constraint::Computed {
                continue;
            }

            let new = proposed.get(name).unwrap_or(&Value::Null);
            let changed = match prior {
                None => !new.is_null(),
                Some(prior) => {
                    let old = prior.get(name).unwrap_or(&Value::Null);
                    if new.is_null() && attribute.constraint == Constraint::OptionalComputed {
                        false
                    } else {
                        !attribute.equivalent(old, new)
                    }
                }
            };

            if changed {
                plan.changed.push(name.clone());
                if attribute.force_new && prior.is_some() {
                    plan.requires_replace.push(name.clone());
                }
            }
        }

        plan
    }
}

fn equivalent_values(
    attr_type: &AttributeType,
    suppress: Option<DiffSuppress>,
    old: &Value,
    new: &Value,
) -> bool {
    match (old, new) {
        (Value::String(a), Value::String(b)) => match suppress {
            Some(suppress) => suppress.suppresses(a, b),
            None => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                return false;
            }
            match attr_type {
                AttributeType::Set(element) => {
                    let mut unmatched: Vec<&Value> = b.iter().collect();
                    a.iter().all(|item| {
                        match unmatched
                            .iter()
                            .position(|other| equivalent_values(element, suppress, item, other))
                        {
                            Some(position) => {
                                unmatched.swap_remove(position);
                                true
                            }
                            None => false,
                        }
                    })
                }
                AttributeType::List(element) => a
                    .iter()
                    .zip(b)
                    .all(|(x, y)| equivalent_values(element, suppress, x, y)),
                AttributeType::BlockList(block) => a
                    .iter()
                    .zip(b)
                    .all(|(x, y)| equivalent_blocks(block, x, y)),
                _ => a == b,
            }
        }
        (Value::Object(a), Value::Object(b)) => match attr_type {
            AttributeType::Map(element) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| {
                        b.get(key)
                            .is_some_and(|y| equivalent_values(element, suppress, x, y))
                    })
            }
            AttributeType::BlockSingle(block) => equivalent_blocks(block, old, new),
            _ => a == b,
        },
        (Value::Null, Value::Array(items)) | (Value::Array(items), Value::Null) => {
            items.is_empty()
        }
        (Value::Null, Value::Object(map)) | (Value::Object(map), Value::Null) => map.is_empty(),
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, Value::Number(n)) | (Value::Number(n), Value::Null) => {
            n.as_f64() == Some(0.0)
        }
        (Value::Null, Value::Bool(b)) | (Value::Bool(b), Value::Null) => !b,
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => old == new,
    }
}

fn equivalent_blocks(block: &Block, old: &Value, new: &Value) -> bool {
    block.attributes.iter().all(|(name, attribute)| {
        let a = old.get(name).unwrap_or(&Value::Null);
        let b = new.get(name).unwrap_or(&Value::Null);
        attribute.equivalent(a, b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::new(
            1,
            Block::new()
                .attribute("email", Attribute::required(AttributeType::String).force_new())
                .attribute(
                    "condition",
                    Attribute::optional(AttributeType::String)
                        .suppress_diff(DiffSuppress::TrimSpaces),
                )
                .attribute(
                    "severity",
                    Attribute::optional(AttributeType::String)
                        .suppress_diff(DiffSuppress::IgnoreCase),
                )
                .attribute("tags", Attribute::optional(AttributeType::set(AttributeType::String)))
                .attribute(
                    "customer",
                    Attribute::optional_computed(AttributeType::String),
                )
                .attribute(
                    "kind",
                    Attribute::optional(AttributeType::String).with_default(json!("CLASSIC")),
                ),
        )
    }

    #[test]
    fn test_whitespace_and_case_do_not_count_as_changes() {
        let schema = sample_schema();
        let prior = json!({"email": "a@b.c", "condition": "ts(x) > 1", "severity": "WARN"});
        let proposed = json!({"email": "a@b.c", "condition": "  ts(x) > 1\n", "severity": "warn"});
        assert!(schema.plan(Some(&prior), &proposed).is_empty());
    }

    #[test]
    fn test_set_order_is_ignored() {
        let schema = sample_schema();
        let prior = json!({"email": "a@b.c", "tags": ["a", "b"]});
        let proposed = json!({"email": "a@b.c", "tags": ["b", "a"]});
        assert!(schema.plan(Some(&prior), &proposed).is_empty());

        let proposed = json!({"email": "a@b.c", "tags": ["b", "c"]});
        assert_eq!(schema.plan(Some(&prior), &proposed).changed, vec!["tags"]);
    }

    #[test]
    fn test_force_new_attribute_requires_replace() {
        let schema = sample_schema();
        let prior = json!({"email": "a@b.c"});
        let proposed = json!({"email": "x@b.c"});
        let plan = schema.plan(Some(&prior), &proposed);
        assert_eq!(plan.changed, vec!["email"]);
        assert_eq!(plan.requires_replace, vec!["email"]);
    }

    #[test]
    fn test_omitted_optional_computed_is_not_a_change() {
        let schema = sample_schema();
        let prior = json!({"email": "a@b.c", "customer": "acme"});
        let proposed = json!({"email": "a@b.c"});
        assert!(schema.plan(Some(&prior), &proposed).is_empty());
    }

    #[test]
    fn test_apply_defaults_fills_missing_values() {
        let schema = sample_schema();
        let mut value = json!({"email": "a@b.c", "kind": null});
        schema.block.apply_defaults(&mut value);
        assert_eq!(value["kind"], json!("CLASSIC"));
    }

    #[test]
    fn test_missing_required_reports_nested_paths() {
        let block = Block::new().attribute(
            "section",
            Attribute::required(AttributeType::blocks(
                Block::new().attribute("name", Attribute::required(AttributeType::String)),
            )),
        );
        let missing = block.missing_required(&json!({"section": [{"name": "a"}, {}]}));
        assert_eq!(missing, vec!["section.1.name"]);
        assert_eq!(block.missing_required(&json!({})), vec!["section"]);
    }
}
