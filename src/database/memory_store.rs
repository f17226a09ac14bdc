//! Almacén durable en memoria
//!
//! Útil para tests y para sesiones efímeras. Los clones comparten el mismo
//! contenido, de modo que un test puede conservar un handle para
//! inspeccionar lo persistido o simular fallos de escritura.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::durable::DurableStore;
use crate::utils::errors::{persistence_error, AppResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
    writes: Rc<Cell<u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace que las siguientes escrituras fallen (o vuelvan a funcionar)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Número de escrituras completadas
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write_all(&mut self, entries: &[(&str, String)]) -> AppResult<()> {
        if self.fail_writes.get() {
            return Err(persistence_error("write snapshot", "memory store rejected the write"));
        }
        let mut map = self.entries.borrow_mut();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> AppResult<()> {
        if self.fail_writes.get() {
            return Err(persistence_error("remove keys", "memory store rejected the write"));
        }
        let mut map = self.entries.borrow_mut();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
