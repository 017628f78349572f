use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

/// Serialized metadata table. Written on every metadata change.
pub const META_KEY: &str = "taskMeta";

/// Serialized demo task list. Written only while in demo mode.
pub const DEMO_TASKS_KEY: &str = "demoTasks";

/// String key-value persistence the board writes through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and decodes `key`. Unreadable or malformed values are logged and
/// treated as absent.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored value");
            return None;
        }
        Err(err) => {
            warn!(key, error = %format!("{err:#}"), "failed reading stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            error!(key, error = %err, "failed parsing stored value; ignoring it");
            None
        }
    }
}

pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).with_context(|| format!("failed encoding {key}"))?;
    store
        .set(key, &json)
        .with_context(|| format!("failed writing {key}"))
}
