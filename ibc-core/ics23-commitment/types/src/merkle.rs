//! Merkle proof utilities

use ibc_primitives::prelude::*;
use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsProvider, NonExistenceProof, ProofSpec,
};
use prost::Message;
use tendermint_proto::crypto::ProofOps;

use crate::commitment::CommitmentRoot;
use crate::error::CommitmentError;
use crate::escape::unescape_path_segment;
use crate::specs::ProofSpecs;

/// The key path of a value inside a layered store, ordered from the
/// outermost store (root) to the leaf key.
///
/// For a Cosmos SDK chain this is `[store_name, key]`. Segments are
/// percent-escaped; the keys committed in the store are the unescaped bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    key_path: Vec<String>,
}

impl MerklePath {
    pub fn new(key_path: Vec<String>) -> Self {
        Self { key_path }
    }

    pub fn key_path(&self) -> &[String] {
        &self.key_path
    }

    pub fn len(&self) -> usize {
        self.key_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_path.is_empty()
    }

    /// Raw store keys of the segments, leaf key first.
    fn leaf_to_root_keys(&self) -> Result<Vec<Vec<u8>>, CommitmentError> {
        self.key_path
            .iter()
            .rev()
            .map(|segment| unescape_path_segment(segment))
            .collect()
    }
}

/// A layered ICS-23 proof: `proofs[0]` proves the leaf key inside its
/// substore, every following proof proves the previous layer's root inside
/// the next store up.
#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    pub proofs: Vec<CommitmentProof>,
}

impl TryFrom<ProofOps> for MerkleProof {
    type Error = CommitmentError;

    /// Each `ProofOp` carries one encoded ICS-23 `CommitmentProof`.
    fn try_from(proof_ops: ProofOps) -> Result<Self, Self::Error> {
        let proofs = proof_ops
            .ops
            .iter()
            .map(|op| {
                CommitmentProof::decode(op.data.as_slice())
                    .map_err(|e| CommitmentError::DecodingFailure(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { proofs })
    }
}

impl MerkleProof {
    /// Decodes protobuf encoded tendermint `ProofOps` into a `MerkleProof`.
    pub fn decode_proof_ops(bytes: &[u8]) -> Result<Self, CommitmentError> {
        let proof_ops = ProofOps::decode(bytes)
            .map_err(|e| CommitmentError::DecodingFailure(e.to_string()))?;
        Self::try_from(proof_ops)
    }

    /// Verifies that `value` is stored under `path` in the state committed
    /// to by `root`.
    pub fn verify_membership<H: HostFunctionsProvider>(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: Vec<u8>,
    ) -> Result<(), CommitmentError> {
        if value.is_empty() {
            return Err(CommitmentError::EmptyVerifiedValue);
        }
        let (specs, keys) = self.check_layers(specs, root, path)?;
        self.verify_layers::<H>(&specs, &keys, root, value, 0)
    }

    /// Verifies that nothing is stored under `path` in the state committed to
    /// by `root`.
    pub fn verify_non_membership<H: HostFunctionsProvider>(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), CommitmentError> {
        let (specs, keys) = self.check_layers(specs, root, path)?;

        // verify the absence of the leaf key in the lowest subtree
        let proof = self
            .proofs
            .first()
            .ok_or(CommitmentError::InvalidMerkleProof)?;
        let spec = specs.first().ok_or(CommitmentError::InvalidMerkleProof)?;
        let key = keys.first().ok_or(CommitmentError::InvalidMerkleProof)?;

        match &proof.proof {
            Some(Proof::Nonexist(non_existence_proof)) => {
                let subroot = calculate_non_existence_root::<H>(non_existence_proof)?;

                if !verify_non_membership::<H>(proof, spec, &subroot, key) {
                    return Err(CommitmentError::VerificationFailure);
                }

                // the remaining layers prove the subroot up to the root
                self.verify_layers::<H>(&specs, &keys, root, subroot, 1)
            }
            _ => Err(CommitmentError::InvalidMerkleProof),
        }
    }

    /// Checks the arguments shared by both verifications and returns the
    /// specs and the raw keys of every layer, leaf layer first.
    fn check_layers(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(Vec<ProofSpec>, Vec<Vec<u8>>), CommitmentError> {
        if self.proofs.is_empty() {
            return Err(CommitmentError::EmptyMerkleProof);
        }
        if root.is_empty() {
            return Err(CommitmentError::EmptyMerkleRoot);
        }
        specs.validate()?;

        let num = self.proofs.len();
        if specs.len() != num {
            return Err(CommitmentError::NumberOfSpecsMismatch {
                proofs: num,
                specs: specs.len(),
            });
        }
        if path.len() != num {
            return Err(CommitmentError::NumberOfKeysMismatch {
                proofs: num,
                keys: path.len(),
            });
        }
        Ok((specs.iter().cloned().collect(), path.leaf_to_root_keys()?))
    }

    /// Walks the existence proofs from layer `start` upwards, proving
    /// `value` at the first walked layer and each computed subroot after it.
    fn verify_layers<H: HostFunctionsProvider>(
        &self,
        specs: &[ProofSpec],
        keys: &[Vec<u8>],
        root: &CommitmentRoot,
        value: Vec<u8>,
        start: usize,
    ) -> Result<(), CommitmentError> {
        let mut subroot = value.clone();
        let mut value = value;

        for ((proof, spec), key) in self
            .proofs
            .iter()
            .zip(specs.iter())
            .zip(keys.iter())
            .skip(start)
        {
            match &proof.proof {
                Some(Proof::Exist(existence_proof)) => {
                    subroot = calculate_existence_root::<H>(existence_proof)
                        .map_err(|_| CommitmentError::InvalidMerkleProof)?;

                    if !verify_membership::<H>(proof, spec, &subroot, key, &value) {
                        return Err(CommitmentError::VerificationFailure);
                    }
                    value.clone_from(&subroot);
                }
                _ => return Err(CommitmentError::InvalidMerkleProof),
            }
        }

        if root.as_bytes() != subroot.as_slice() {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok(())
    }
}

fn calculate_non_existence_root<H: HostFunctionsProvider>(
    proof: &NonExistenceProof,
) -> Result<Vec<u8>, CommitmentError> {
    if let Some(left) = &proof.left {
        calculate_existence_root::<H>(left).map_err(|_| CommitmentError::InvalidMerkleProof)
    } else if let Some(right) = &proof.right {
        calculate_existence_root::<H>(right).map_err(|_| CommitmentError::InvalidMerkleProof)
    } else {
        Err(CommitmentError::InvalidMerkleProof)
    }
}
