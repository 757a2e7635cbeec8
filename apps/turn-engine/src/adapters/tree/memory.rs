//! In-memory implementation of `TreeStore`.
//!
//! Holds the whole tree as one JSON document and mimics the remote store's
//! semantics: null and empty containers are never stored, multi-path update
//! keys address nested nodes, and push keys are time-ordered ULIDs. All data
//! is lost on drop. Write faults can be injected to exercise error paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use ulid::Generator;

use super::{StoreError, StorePath, TreeStore};

pub struct InMemoryTree {
    root: RwLock<Value>,
    keys: Mutex<Generator>,
    failing_prefixes: Mutex<Vec<String>>,
    unavailable: AtomicBool,
}

impl InMemoryTree {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
            keys: Mutex::new(Generator::new()),
            failing_prefixes: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Start from an existing document.
    pub fn with_root(root: Value) -> Self {
        let tree = Self::new();
        *tree.root.write() = prune(root).unwrap_or_else(|| Value::Object(Map::new()));
        tree
    }

    /// Copy of the entire tree.
    pub fn snapshot(&self) -> Value {
        self.root.read().clone()
    }

    /// Make every write at or below `prefix` fail with `WriteFailed`.
    pub fn fail_writes_under(&self, prefix: &StorePath) {
        self.failing_prefixes.lock().push(prefix.to_string());
    }

    pub fn clear_faults(&self) {
        self.failing_prefixes.lock().clear();
        self.unavailable.store(false, Ordering::SeqCst);
    }

    /// Make every operation fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory tree marked unavailable"));
        }
        Ok(())
    }

    fn check_writable(&self, path: &StorePath) -> Result<(), StoreError> {
        self.check_available()?;
        let target = path.as_str();
        let failing = self.failing_prefixes.lock();
        if failing
            .iter()
            .any(|p| target == p || target.starts_with(&format!("{p}/")) || p.is_empty())
        {
            return Err(StoreError::write_failed(path, "injected write fault"));
        }
        Ok(())
    }
}

impl Default for InMemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreeStore for InMemoryTree {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        self.check_available()?;
        let root = self.root.read();
        let mut node = &*root;
        for segment in path.segments() {
            let next = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node.clone()))
    }

    async fn set(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        self.check_writable(path)?;
        let mut root = self.root.write();
        write_at(&mut root, path, value);
        Ok(())
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError> {
        // Validate every target first so a failing field leaves the tree untouched.
        let targets: Vec<(StorePath, Value)> = fields
            .into_iter()
            .map(|(key, value)| (path.child(&key), value))
            .collect();
        for (target, _) in &targets {
            if target == path {
                return Err(StoreError::write_failed(path, "empty update key"));
            }
            self.check_writable(target)?;
        }
        let mut root = self.root.write();
        for (target, value) in targets {
            write_at(&mut root, &target, value);
        }
        Ok(())
    }

    async fn delete(&self, path: &StorePath) -> Result<(), StoreError> {
        self.check_writable(path)?;
        let mut root = self.root.write();
        write_at(&mut root, path, Value::Null);
        Ok(())
    }

    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        let key = self
            .keys
            .lock()
            .generate()
            .map_err(|e| StoreError::write_failed(path, format!("push key: {e}")))?
            .to_string();
        let target = path.child(&key);
        self.check_writable(&target)?;
        let mut root = self.root.write();
        write_at(&mut root, &target, value);
        Ok(key)
    }
}

/// Replace the node at `path` (removing it for null/empty values) and prune
/// any containers left empty.
fn write_at(root: &mut Value, path: &StorePath, value: Value) {
    let segments: Vec<&str> = path.segments().collect();
    let value = prune(value);
    match segments.split_first() {
        None => *root = value.unwrap_or_else(|| Value::Object(Map::new())),
        Some(_) => {
            write_rec(root, &segments, value);
        }
    }
}

/// Returns true when `node` became empty and should be removed by its parent.
fn write_rec(node: &mut Value, segments: &[&str], value: Option<Value>) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return false;
    };
    if !node.is_object() {
        if value.is_none() {
            return false;
        }
        *node = array_to_object(node.take());
    }
    let Value::Object(map) = node else {
        return false;
    };
    if rest.is_empty() {
        match value {
            Some(v) => {
                map.insert((*head).to_string(), v);
            }
            None => {
                map.remove(*head);
            }
        }
    } else {
        let child = map
            .entry((*head).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if write_rec(child, rest, value) {
            map.remove(*head);
        }
    }
    map.is_empty()
}

/// Positional arrays become index-keyed objects once written into by key.
fn array_to_object(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => Value::Object(Map::new()),
    }
}

/// Drop nulls and empty containers; `None` means "no value".
fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k, v)))
                .collect();
            (!pruned.is_empty()).then_some(Value::Object(pruned))
        }
        Value::Array(items) => {
            let pruned: Vec<Value> = items.into_iter().filter_map(prune).collect();
            (!pruned.is_empty()).then_some(Value::Array(pruned))
        }
        other => Some(other),
    }
}
