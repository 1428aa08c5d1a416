//! Defines the commitment error type

use displaydoc::Display;
use ibc_primitives::prelude::*;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum CommitmentError {
    /// empty merkle proof
    EmptyMerkleProof,
    /// empty merkle root
    EmptyMerkleRoot,
    /// empty verified value
    EmptyVerifiedValue,
    /// empty proof specs
    EmptyProofSpecs,
    /// invalid depth range: [{0}, {1}]
    InvalidDepthRange(i32, i32),
    /// mismatch between the number of proofs (`{proofs}`) and specs (`{specs}`)
    NumberOfSpecsMismatch { proofs: usize, specs: usize },
    /// mismatch between the number of proofs (`{proofs}`) and keys (`{keys}`)
    NumberOfKeysMismatch { proofs: usize, keys: usize },
    /// invalid merkle path segment: `{0}`
    InvalidPathSegment(String),
    /// invalid merkle proof
    InvalidMerkleProof,
    /// proof verification failed
    VerificationFailure,
    /// decoding commitment proof bytes failed: `{0}`
    DecodingFailure(String),
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {}
