//! Mock light client states, carrying only what query proofs are checked
//! against.

use alloc::collections::BTreeMap;

use ibc_app_icq::context::{QueryClientState, QueryConsensusState};
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::ChainId;
use ibc_icq_commitment_types::commitment::CommitmentRoot;
use ibc_icq_commitment_types::specs::ProofSpecs;
use ibc_primitives::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MockClientState {
    pub client_type: String,
    pub chain_id: ChainId,
    pub proof_specs: ProofSpecs,
}

impl QueryClientState for MockClientState {
    fn client_type(&self) -> &str {
        &self.client_type
    }

    fn chain_id(&self) -> ChainId {
        self.chain_id.clone()
    }

    fn proof_specs(&self) -> &ProofSpecs {
        &self.proof_specs
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockConsensusState {
    pub root: CommitmentRoot,
}

impl MockConsensusState {
    pub fn new(root: CommitmentRoot) -> Self {
        Self { root }
    }
}

impl QueryConsensusState for MockConsensusState {
    fn root(&self) -> &CommitmentRoot {
        &self.root
    }
}

/// A light client known to the mock host.
#[derive(Clone, Debug)]
pub struct MockClientRecord {
    pub client_state: MockClientState,
    /// Mapping of heights to consensus states for this client.
    pub consensus_states: BTreeMap<Height, MockConsensusState>,
}
