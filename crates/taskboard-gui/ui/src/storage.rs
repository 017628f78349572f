use anyhow::anyhow;
use taskboard_core::{
  KeyValueStore,
  MemoryStore
};

/// Board persistence for the page.
/// Uses `localStorage` when the
/// browser offers it and keeps
/// entries in memory otherwise.
#[derive(Debug, Clone)]
pub enum BrowserStorage {
  Local(web_sys::Storage),
  Memory(MemoryStore)
}

impl BrowserStorage {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });

    match storage {
      | Some(storage) => {
        Self::Local(storage)
      }
      | None => {
        tracing::warn!(
          "local storage unavailable; \
           board data will not survive \
           a reload"
        );
        Self::Memory(MemoryStore::new())
      }
    }
  }
}

impl KeyValueStore for BrowserStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    match self {
      | Self::Local(storage) => {
        storage.get_item(key).map_err(
          |error| {
            anyhow!(
              "failed reading {key} from \
               local storage: {error:?}"
            )
          }
        )
      }
      | Self::Memory(store) => {
        store.get(key)
      }
    }
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match self {
      | Self::Local(storage) => {
        storage
          .set_item(key, value)
          .map_err(|error| {
            anyhow!(
              "failed writing {key} to \
               local storage: {error:?}"
            )
          })
      }
      | Self::Memory(store) => {
        store.set(key, value)
      }
    }
  }

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()> {
    match self {
      | Self::Local(storage) => {
        storage.remove_item(key).map_err(
          |error| {
            anyhow!(
              "failed removing {key} from \
               local storage: {error:?}"
            )
          }
        )
      }
      | Self::Memory(store) => {
        store.remove(key)
      }
    }
  }
}
