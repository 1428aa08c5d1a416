//! Verification of relayed query results against the light client of the
//! queried chain

use ibc_app_icq_types::error::IcqError;
use ibc_app_icq_types::msgs::MsgSubmitQueryResponse;
use ibc_app_icq_types::{QueryRecord, TENDERMINT_CLIENT_TYPE};
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::ChainId;
use ibc_icq_commitment_types::merkle::MerkleProof;
use ibc_primitives::prelude::*;
use ics23::HostFunctionsManager;
use tracing::debug;

use crate::context::{IcqValidationContext, QueryClientState, QueryConsensusState};

/// Height of the consensus state whose root commits to a value read at
/// `query_height` on `chain_id`. The app hash of a block is only committed
/// in the header of the next block.
pub fn proof_height(chain_id: &ChainId, query_height: u64) -> Result<Height, IcqError> {
    let revision_height = query_height
        .checked_add(1)
        .ok_or(IcqError::HeightOverflow(query_height))?;
    Height::new(chain_id.revision_number(), revision_height).map_err(|e| {
        IcqError::InvalidHeight {
            description: e.to_string(),
        }
    })
}

/// Checks that `msg.result` is what `query` reads on the queried chain at
/// `msg.height`, using the proof carried by `msg`.
///
/// A non-empty result must be proven present under the query's key path,
/// an empty result must be proven absent.
pub fn verify_query_response<Ctx>(
    ctx: &Ctx,
    query: &QueryRecord,
    msg: &MsgSubmitQueryResponse,
) -> Result<(), IcqError>
where
    Ctx: IcqValidationContext,
{
    let proof_ops = msg.proof().ok_or_else(|| IcqError::MissingProof {
        query_id: query.id.clone(),
    })?;

    let conn_end = ctx.connection_end(&query.connection_id)?.ok_or_else(|| {
        IcqError::MissingConnection {
            connection_id: query.connection_id.clone(),
        }
    })?;
    let client_id = conn_end.client_id();

    let height = proof_height(&query.chain_id, msg.height)?;
    let consensus_state = ctx
        .consensus_state(client_id, &height)?
        .ok_or_else(|| IcqError::MissingConsensusState {
            client_id: client_id.clone(),
            height,
        })?;

    let client_state = ctx
        .client_state(client_id)?
        .ok_or_else(|| IcqError::MissingClientState {
            client_id: client_id.clone(),
        })?;
    if client_state.client_type() != TENDERMINT_CLIENT_TYPE {
        return Err(IcqError::UnsupportedClientType {
            client_type: client_state.client_type().to_string(),
        });
    }
    let client_chain_id = client_state.chain_id();
    if client_chain_id != query.chain_id {
        return Err(IcqError::ChainIdMismatch {
            expected: query.chain_id.clone(),
            actual: client_chain_id,
        });
    }

    let path = query.merkle_path()?;
    let merkle_proof = MerkleProof::try_from(proof_ops.clone())?;

    debug!(
        query_id = %query.id,
        %client_id,
        %height,
        key_path = ?path.key_path(),
        "verifying query proof"
    );

    let verified = if msg.result.is_empty() {
        merkle_proof.verify_non_membership::<HostFunctionsManager>(
            client_state.proof_specs(),
            consensus_state.root(),
            &path,
        )
    } else {
        merkle_proof.verify_membership::<HostFunctionsManager>(
            client_state.proof_specs(),
            consensus_state.root(),
            &path,
            msg.result.clone(),
        )
    };

    verified.map_err(|error| IcqError::ProofVerification {
        query_id: query.id.clone(),
        error,
    })
}
