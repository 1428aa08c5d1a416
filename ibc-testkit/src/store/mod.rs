//! A minimal key/value store backing the mock host context.

mod codec;
mod in_memory;
mod typed;

pub use codec::{Codec, ProtobufCodec};
pub use in_memory::InMemoryStore;
pub use typed::{ProtobufStore, StoreError, TypedStore};

use ibc_primitives::prelude::*;

/// Store that holds raw bytes under string paths.
pub trait Store {
    /// Error type - expected to envelope all possible errors in store
    type Error: core::fmt::Display;

    /// Set `value` for `path`, returning the value previously stored there.
    fn set(&mut self, path: String, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Get associated `value` for `path`
    fn get(&self, path: &str) -> Option<Vec<u8>>;

    /// Delete the value stored at `path`, if any.
    fn delete(&mut self, path: &str);

    /// Return the stored paths starting with `key_prefix`, in key order.
    fn get_keys(&self, key_prefix: &str) -> Vec<String>;
}
