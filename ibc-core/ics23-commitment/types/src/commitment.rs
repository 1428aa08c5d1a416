//! Defines the commitment root a light client stores per consensus state.

use core::fmt;

use ibc_primitives::prelude::*;

/// Encodes a commitment root; most often a Merkle tree root hash (the
/// `app_hash` of a Cosmos SDK chain).
#[derive(Clone, PartialEq, Eq, derive_more::From, derive_more::Into)]
pub struct CommitmentRoot {
    bytes: Vec<u8>,
}

impl fmt::Debug for CommitmentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: String = self.bytes.iter().map(|b| format!("{b:02X}")).collect();
        f.debug_tuple("CommitmentRoot").field(&hex).finish()
    }
}

impl CommitmentRoot {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: Vec::from(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
