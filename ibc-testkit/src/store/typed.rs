use core::fmt::Display;
use core::marker::PhantomData;

use displaydoc::Display as DisplayDoc;
use ibc_primitives::prelude::*;

use super::codec::{Codec, ProtobufCodec};
use super::Store;

/// A `TypedStore` that uses the `ProtobufCodec`
pub type ProtobufStore<S, K, V, R> = TypedStore<S, K, ProtobufCodec<V, R>>;

#[derive(Debug, DisplayDoc, PartialEq, Eq)]
pub enum StoreError {
    /// failed to encode value at path `{path}`
    Encode { path: String },
    /// failed to decode value at path `{path}`
    Decode { path: String },
    /// store backend error: `{description}`
    Backend { description: String },
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

/// A store of values of one type, keyed by typed paths.
#[derive(Clone, Debug)]
pub struct TypedStore<S, K, C> {
    store: S,
    _key: PhantomData<K>,
    _codec: PhantomData<C>,
}

impl<S, K, C, V> TypedStore<S, K, C>
where
    S: Store,
    C: Codec<Type = V>,
    K: Display,
{
    #[inline]
    pub fn new(store: S) -> Self {
        Self {
            store,
            _codec: PhantomData,
            _key: PhantomData,
        }
    }

    #[inline]
    pub fn set(&mut self, path: &K, value: V) -> Result<Option<V>, StoreError> {
        let path = path.to_string();
        let encoded = C::encode(&value).ok_or_else(|| StoreError::Encode { path: path.clone() })?;
        self.store
            .set(path, encoded.as_ref().to_vec())
            .map(|prev_val| prev_val.and_then(|v| C::decode(&v)))
            .map_err(|e| StoreError::Backend {
                description: e.to_string(),
            })
    }

    #[inline]
    pub fn delete(&mut self, path: &K) {
        self.store.delete(&path.to_string())
    }

    #[inline]
    pub fn get(&self, path: &K) -> Result<Option<V>, StoreError> {
        self.get_at(&path.to_string())
    }

    /// Reads the value stored at a raw `path`, as listed by `get_keys`.
    pub fn get_at(&self, path: &str) -> Result<Option<V>, StoreError> {
        self.store
            .get(path)
            .map(|bytes| {
                C::decode(&bytes).ok_or_else(|| StoreError::Decode {
                    path: path.to_string(),
                })
            })
            .transpose()
    }

    #[inline]
    pub fn get_keys(&self, key_prefix: &str) -> Vec<String> {
        self.store.get_keys(key_prefix)
    }
}
