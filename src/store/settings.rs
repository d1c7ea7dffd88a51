//! User settings as a persistent tree.
//!
//! Branches hold their children behind `Arc`, so writing one leaf copies
//! only the branches on the path to it; every sibling subtree stays shared
//! with the previous tree.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("settings path is empty")]
    EmptyPath,
    #[error("settings path segment '{0}' does not exist")]
    MissingSegment(String),
    #[error("settings path segment '{0}' is not an object")]
    NotAnObject(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsNode {
    Leaf(Value),
    Branch(BTreeMap<String, Arc<SettingsNode>>),
}

impl SettingsNode {
    pub fn child(&self, key: &str) -> Option<&Arc<SettingsNode>> {
        match self {
            SettingsNode::Branch(children) => children.get(key),
            SettingsNode::Leaf(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            SettingsNode::Leaf(value) => Some(value),
            SettingsNode::Branch(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            SettingsNode::Leaf(value) => value.clone(),
            SettingsNode::Branch(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for SettingsNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => SettingsNode::Branch(
                map.into_iter()
                    .map(|(key, child)| (key, Arc::new(SettingsNode::from(child))))
                    .collect(),
            ),
            other => SettingsNode::Leaf(other),
        }
    }
}

/// Returns a new tree with `value` stored at `path`.
///
/// Each branch along the path is shallow-cloned; untouched children are
/// shared with `node`. Intermediate segments must already exist as branches.
pub fn set_path(
    node: &Arc<SettingsNode>,
    path: &[String],
    value: SettingsNode,
) -> Result<Arc<SettingsNode>, PathError> {
    let (key, rest) = path.split_first().ok_or(PathError::EmptyPath)?;

    let SettingsNode::Branch(children) = node.as_ref() else {
        return Err(PathError::NotAnObject(key.clone()));
    };

    let mut children = children.clone();
    if rest.is_empty() {
        children.insert(key.clone(), Arc::new(value));
    } else {
        let child = children
            .get(key)
            .ok_or_else(|| PathError::MissingSegment(key.clone()))?;
        if !matches!(child.as_ref(), SettingsNode::Branch(_)) {
            return Err(PathError::NotAnObject(key.clone()));
        }
        let updated = set_path(child, rest, value)?;
        children.insert(key.clone(), updated);
    }

    Ok(Arc::new(SettingsNode::Branch(children)))
}

/// Root of the settings tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    root: Arc<SettingsNode>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_value(json!({
            "themeColor": "yellow",
            "darkMode": false,
            "notifications": {
                "inApp": true,
                "email": true,
                "push": false
            },
            "calendar": {
                "syncGoogle": false,
                "syncOutlook": false,
                "defaultView": "month"
            },
            "privacy": {
                "profileVisibility": "workspace",
                "twoFactorAuth": false
            }
        }))
    }
}

impl Settings {
    /// Builds a tree from JSON. A non-object value becomes an empty root.
    pub fn from_value(value: Value) -> Self {
        let root = match SettingsNode::from(value) {
            branch @ SettingsNode::Branch(_) => branch,
            SettingsNode::Leaf(_) => SettingsNode::Branch(BTreeMap::new()),
        };
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Arc<SettingsNode> {
        &self.root
    }

    /// Subtree at `path`, if every segment resolves.
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&Arc<SettingsNode>> {
        let mut cursor = &self.root;
        for key in path {
            cursor = cursor.child(key.as_ref())?;
        }
        Some(cursor)
    }

    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        self.node(path).and_then(|node| node.as_value())
    }

    pub fn theme_color(&self) -> Option<&str> {
        self.get(&["themeColor"]).and_then(Value::as_str)
    }

    pub fn dark_mode(&self) -> bool {
        self.get(&["darkMode"]).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn calendar_default_view(&self) -> Option<&str> {
        self.get(&["calendar", "defaultView"]).and_then(Value::as_str)
    }

    /// Replaces the top-level keys present in `patch`, leaving the rest shared.
    pub fn merge(&self, patch: Map<String, Value>) -> Self {
        let mut children = match self.root.as_ref() {
            SettingsNode::Branch(children) => children.clone(),
            SettingsNode::Leaf(_) => BTreeMap::new(),
        };
        for (key, value) in patch {
            children.insert(key, Arc::new(SettingsNode::from(value)));
        }
        Self {
            root: Arc::new(SettingsNode::Branch(children)),
        }
    }

    pub fn with_path(&self, path: &[String], value: Value) -> Result<Self, PathError> {
        let root = set_path(&self.root, path, SettingsNode::from(value))?;
        Ok(Self { root })
    }

    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.root.as_ref() {
            SettingsNode::Branch(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(key, &child.to_value())?;
                }
                map.end()
            }
            SettingsNode::Leaf(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_value(Value::Object(map)))
    }
}
