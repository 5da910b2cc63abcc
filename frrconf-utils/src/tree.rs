//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use itertools::Itertools;
use serde_json::{Map, Value};

// Read-only view of a desired configuration subtree.
//
// Field names are matched in their normalized form (`-` becomes `_`), so
// paths may use either spelling. List entry names (interface names, prefixes)
// are kept verbatim. Absent keys are never filled in with defaults: a missing
// node means the feature is disabled.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigTree {
    root: Map<String, Value>,
}

// ===== impl ConfigTree =====

impl ConfigTree {
    // Builds a tree from a configuration mapping. Anything other than an
    // object yields an empty tree.
    pub fn new(value: Value) -> ConfigTree {
        match value {
            Value::Object(root) => ConfigTree { root },
            _ => ConfigTree::default(),
        }
    }

    // Extracts the subtree found at `base` inside a full configuration
    // document. A missing base yields an empty tree.
    pub fn from_document(document: Value, base: &str) -> ConfigTree {
        let document = ConfigTree::new(document);
        document.subtree(base)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    // Names of the top-level nodes, sorted.
    pub fn names(&self) -> Vec<String> {
        self.root.keys().cloned().sorted().collect()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    // Looks up the node at a dotted path. The empty path is not a valid node
    // reference since the root is not a `Value`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut components = path.split('.').filter(|c| !c.is_empty());
        let first = components.next()?;
        let mut node = lookup(&self.root, first)?;
        for component in components {
            node = lookup(node.as_object()?, component)?;
        }
        Some(node)
    }

    // Returns a scalar leaf as a string. Numbers and booleans are
    // stringified; mappings and sequences are not scalars.
    pub fn get_str(&self, path: &str) -> Option<String> {
        self.get(path).and_then(scalar_to_string)
    }

    pub fn get_u32(&self, path: &str) -> Option<u32> {
        self.get_str(path).and_then(|value| value.parse().ok())
    }

    // Returns all values of a leaf that may hold one or many values.
    pub fn values(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(values)) => {
                values.iter().filter_map(scalar_to_string).collect()
            }
            Some(value) => scalar_to_string(value).into_iter().collect(),
            None => vec![],
        }
    }

    // Returns the entry names of a list node.
    //
    // A mapping yields its keys in sorted order, a sequence yields its
    // scalar elements in the given order, and a scalar yields itself.
    pub fn keys(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Object(map)) => map.keys().cloned().sorted().collect(),
            Some(_) => self.values(path),
            None => vec![],
        }
    }

    // Returns the subtree rooted at the given path (or the whole tree for
    // the empty path). Non-mapping nodes yield an empty tree.
    pub fn subtree(&self, path: &str) -> ConfigTree {
        if path.is_empty() {
            return self.clone();
        }
        match self.get(path) {
            Some(Value::Object(map)) => ConfigTree { root: map.clone() },
            _ => ConfigTree::default(),
        }
    }

    // Returns the (name, subtree) pairs of a list node (or of the root for
    // the empty path), ordered like `keys`. Entries of a sequence have empty
    // subtrees.
    //
    // Entry names are used verbatim, so names containing dots (prefixes)
    // are safe here even though they can't be part of a dotted path.
    pub fn entries(&self, path: &str) -> Vec<(String, ConfigTree)> {
        let map = match self.get(path) {
            _ if path.is_empty() => &self.root,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return self
                    .values(path)
                    .into_iter()
                    .map(|key| (key, ConfigTree::default()))
                    .collect();
            }
            None => return vec![],
        };
        map.iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(key, value)| (key.clone(), ConfigTree::new(value.clone())))
            .collect()
    }
}

impl From<Value> for ConfigTree {
    fn from(value: Value) -> ConfigTree {
        ConfigTree::new(value)
    }
}

// ===== helper functions =====

// Normalizes a field name to the internal key style.
pub fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

// Exact match first, then a match on the normalized spelling.
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        let key = normalize_key(key);
        map.iter()
            .find(|(candidate, _)| normalize_key(candidate) == key)
            .map(|(_, value)| value)
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

// ===== unit tests =====
