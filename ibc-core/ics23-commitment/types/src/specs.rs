//! Defines proof specs, which encode the structure of proofs

use ibc_primitives::prelude::*;
use ics23::ProofSpec;

use crate::error::CommitmentError;

/// An ordered list of proof specifications, one per layer of a layered
/// merkle proof (leaf layer first).
///
/// Light clients of Cosmos SDK chains hold [`ProofSpecs::cosmos`]: an IAVL
/// store proof followed by a multistore (simple merkle) proof.
#[derive(Clone, Debug, PartialEq)]
pub struct ProofSpecs(Vec<ProofSpec>);

impl ProofSpecs {
    /// Returns the specification for Cosmos-SDK proofs
    pub fn cosmos() -> Self {
        Self(vec![
            ics23::iavl_spec(),       // Format of proofs-iavl (iavl merkle proofs)
            ics23::tendermint_spec(), // Format of proofs-tendermint (crypto/ merkle SimpleProof)
        ])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProofSpec> {
        self.0.iter()
    }

    pub fn validate(&self) -> Result<(), CommitmentError> {
        if self.is_empty() {
            return Err(CommitmentError::EmptyProofSpecs);
        }
        for spec in &self.0 {
            // A non-positive `min_depth` or `max_depth` indicates no limit on the respective bound.
            if 0 < spec.min_depth && 0 < spec.max_depth && spec.max_depth < spec.min_depth {
                return Err(CommitmentError::InvalidDepthRange(
                    spec.min_depth,
                    spec.max_depth,
                ));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<ProofSpec>> for ProofSpecs {
    type Error = CommitmentError;

    fn try_from(specs: Vec<ProofSpec>) -> Result<Self, Self::Error> {
        let specs = Self(specs);
        specs.validate()?;
        Ok(specs)
    }
}

impl From<ProofSpecs> for Vec<ProofSpec> {
    fn from(specs: ProofSpecs) -> Self {
        specs.0
    }
}
