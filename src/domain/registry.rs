//! Key registry: unique, write-once keys for columns and groups

use std::collections::HashMap;

use tracing::{instrument, trace};

use crate::domain::entities::ColumnBase;
use crate::domain::error::{GridError, GridResult};

/// Maps keys to the units they address within one Grid.
///
/// A unit's key lives on the unit itself and can be written once; the
/// registry only tracks which keys are currently bound. Unregistering a unit
/// frees the key for reuse but leaves it readable on the unit.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    bindings: HashMap<String, ColumnBase>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `unit` and records it on the unit.
    #[instrument(level = "trace", skip(self))]
    pub fn bind(&mut self, unit: &ColumnBase, key: &str) -> GridResult<()> {
        if let Some(current) = unit.key() {
            return Err(GridError::KeyAlreadySet {
                current: current.to_string(),
                requested: key.to_string(),
            });
        }
        if self.bindings.contains_key(key) {
            return Err(GridError::DuplicateKey(key.to_string()));
        }

        unit.key_slot()
            .set(key.to_string())
            .map_err(|current| GridError::KeyAlreadySet {
                current,
                requested: key.to_string(),
            })?;
        self.bindings.insert(key.to_string(), unit.clone());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ColumnBase> {
        self.bindings.get(key)
    }

    /// Drops the binding of `unit`'s key, if it is bound to `unit`.
    ///
    /// Returns whether a binding was removed; calling it again is a no-op.
    pub fn unregister(&mut self, unit: &ColumnBase) -> bool {
        let Some(key) = unit.key() else {
            return false;
        };
        if self.bindings.get(key) != Some(unit) {
            return false;
        }
        trace!(key, "unregistered key");
        self.bindings.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}
