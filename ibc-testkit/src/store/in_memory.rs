use alloc::collections::BTreeMap;
use core::convert::Infallible;

use ibc_primitives::prelude::*;
use tracing::trace;

use super::Store;

/// An in-memory store backed by a `BTreeMap`, so that keys are always
/// listed in lexicographic order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    state: BTreeMap<String, Vec<u8>>,
}

impl InMemoryStore {
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl Store for InMemoryStore {
    type Error = Infallible; // underlying store ops are infallible

    fn set(&mut self, path: String, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error> {
        trace!("set at path = {path}");
        Ok(self.state.insert(path, value))
    }

    fn get(&self, path: &str) -> Option<Vec<u8>> {
        trace!("get at path = {path}");
        self.state.get(path).cloned()
    }

    fn delete(&mut self, path: &str) {
        trace!("delete at path = {path}");
        self.state.remove(path);
    }

    fn get_keys(&self, key_prefix: &str) -> Vec<String> {
        self.state
            .keys()
            .filter(|key| key.starts_with(key_prefix))
            .cloned()
            .collect()
    }
}
