//! A multistore committing its values the way a Cosmos SDK chain with
//! simple merkle trees does, producing the ICS-23 proofs relayers attach
//! to query responses.

use alloc::collections::BTreeMap;

use ibc_icq_commitment_types::commitment::CommitmentRoot;
use ibc_icq_commitment_types::specs::ProofSpecs;
use ibc_primitives::prelude::*;
use ics23::commitment_proof::Proof;
use ics23::{CommitmentProof, ExistenceProof, HashOp, InnerOp, NonExistenceProof};
use prost::Message;
use sha2::{Digest, Sha256};
use tendermint_proto::crypto::{ProofOp, ProofOps};

pub const SIMPLE_PROOF_OP_TYPE: &str = "ics23:simple";

/// Proof specs of a chain whose stores and multistore are both simple
/// merkle trees, leaf layer first.
pub fn simple_merkle_proof_specs() -> ProofSpecs {
    ProofSpecs::try_from(vec![ics23::tendermint_spec(), ics23::tendermint_spec()])
        .expect("no error")
}

/// Named stores of key/value pairs, committed under a single app hash.
#[derive(Clone, Debug, Default)]
pub struct MockMultiStore {
    stores: BTreeMap<String, BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MockMultiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty store named `store`.
    pub fn with_store(mut self, store: &str) -> Self {
        self.stores.entry(store.to_string()).or_default();
        self
    }

    /// Sets `key` to `value` in `store`, creating the store if needed.
    pub fn with_value(mut self, store: &str, key: &[u8], value: &[u8]) -> Self {
        self.stores
            .entry(store.to_string())
            .or_default()
            .insert(key.to_vec(), value.to_vec());
        self
    }

    /// The app hash committing to every store.
    pub fn root(&self) -> CommitmentRoot {
        let store_leaves = self.store_leaves();
        CommitmentRoot::from_bytes(&tree_root(&store_leaves))
    }

    /// Proof that `key` holds its current value in `store`, or that it is
    /// absent when the store does not hold it.
    ///
    /// Returns `None` if there is no such store, or if absence has to be
    /// proven in an empty store.
    pub fn proof(&self, store: &str, key: &[u8]) -> Option<ProofOps> {
        let entries = self.stores.get(store)?;
        let leaves: Vec<(Vec<u8>, Vec<u8>)> = entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let key_proof = match leaves.iter().position(|(k, _)| k.as_slice() == key) {
            Some(index) => Proof::Exist(existence_proof(&leaves, index)),
            None => Proof::Nonexist(non_existence_proof(&leaves, key)?),
        };

        let store_leaves = self.store_leaves();
        let store_index = store_leaves
            .iter()
            .position(|(name, _)| name.as_slice() == store.as_bytes())?;
        let store_proof = Proof::Exist(existence_proof(&store_leaves, store_index));

        Some(ProofOps {
            ops: vec![
                proof_op(key, key_proof),
                proof_op(store.as_bytes(), store_proof),
            ],
        })
    }

    /// Leaves of the multistore tree: store names mapped to store roots.
    fn store_leaves(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.stores
            .iter()
            .map(|(name, entries)| {
                let leaves: Vec<(Vec<u8>, Vec<u8>)> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                (name.as_bytes().to_vec(), tree_root(&leaves))
            })
            .collect()
    }
}

fn proof_op(key: &[u8], proof: Proof) -> ProofOp {
    ProofOp {
        r#type: SIMPLE_PROOF_OP_TYPE.to_string(),
        key: key.to_vec(),
        data: CommitmentProof { proof: Some(proof) }.encode_to_vec(),
    }
}

fn encode_len(len: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    prost::encoding::encode_varint(len as u64, &mut buf);
    buf
}

fn leaf_hash(key: &[u8], value: &[u8]) -> Vec<u8> {
    let value_hash = Sha256::digest(value);
    let mut hasher = Sha256::new();
    hasher.update([0u8]);
    hasher.update(encode_len(key.len()));
    hasher.update(key);
    hasher.update(encode_len(value_hash.len()));
    hasher.update(value_hash);
    hasher.finalize().to_vec()
}

fn inner_hash(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update([1u8]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().to_vec()
}

/// Largest power of two strictly smaller than `n`, for `n > 1`.
fn split_point(n: usize) -> usize {
    let mut split = 1;
    while split * 2 < n {
        split *= 2;
    }
    split
}

fn tree_root(leaves: &[(Vec<u8>, Vec<u8>)]) -> Vec<u8> {
    match leaves {
        [] => Sha256::digest([0u8; 0]).to_vec(),
        [(key, value)] => leaf_hash(key, value),
        _ => {
            let split = split_point(leaves.len());
            inner_hash(&tree_root(&leaves[..split]), &tree_root(&leaves[split..]))
        }
    }
}

/// Inner operations from the leaf at `index` up to the root.
fn inner_path(leaves: &[(Vec<u8>, Vec<u8>)], index: usize) -> Vec<InnerOp> {
    if leaves.len() <= 1 {
        return Vec::new();
    }
    let split = split_point(leaves.len());
    if index < split {
        let mut path = inner_path(&leaves[..split], index);
        path.push(InnerOp {
            hash: HashOp::Sha256.into(),
            prefix: vec![1],
            suffix: tree_root(&leaves[split..]),
        });
        path
    } else {
        let mut path = inner_path(&leaves[split..], index - split);
        let mut prefix = vec![1];
        prefix.extend(tree_root(&leaves[..split]));
        path.push(InnerOp {
            hash: HashOp::Sha256.into(),
            prefix,
            suffix: Vec::new(),
        });
        path
    }
}

fn existence_proof(leaves: &[(Vec<u8>, Vec<u8>)], index: usize) -> ExistenceProof {
    let (key, value) = &leaves[index];
    ExistenceProof {
        key: key.clone(),
        value: value.clone(),
        leaf: ics23::tendermint_spec().leaf_spec,
        path: inner_path(leaves, index),
    }
}

/// Proves `key` absent through its neighbours in the sorted `leaves`.
fn non_existence_proof(leaves: &[(Vec<u8>, Vec<u8>)], key: &[u8]) -> Option<NonExistenceProof> {
    if leaves.is_empty() {
        return None;
    }
    let right_index = leaves.iter().position(|(k, _)| k.as_slice() > key);
    let left_index = match right_index {
        Some(0) => None,
        Some(index) => Some(index - 1),
        None => Some(leaves.len() - 1),
    };

    Some(NonExistenceProof {
        key: key.to_vec(),
        left: left_index.map(|index| existence_proof(leaves, index)),
        right: right_index.map(|index| existence_proof(leaves, index)),
    })
}
