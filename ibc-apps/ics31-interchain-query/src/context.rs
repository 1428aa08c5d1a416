//! Defines the context traits a host implements to process query responses

use ibc_app_icq_types::error::IcqError;
use ibc_app_icq_types::events::IcqEvent;
use ibc_app_icq_types::{QueryPath, QueryRecord};
use ibc_core_client_types::Height;
use ibc_core_connection_types::ConnectionEnd;
use ibc_core_host_types::identifiers::{ChainId, ClientId, ConnectionId};
use ibc_icq_commitment_types::commitment::CommitmentRoot;
use ibc_icq_commitment_types::specs::ProofSpecs;
use ibc_primitives::prelude::*;
use ibc_primitives::{Signer, Timestamp};

/// The view of a light client state needed to verify query proofs.
pub trait QueryClientState {
    /// Type of the light client, e.g. `07-tendermint`.
    fn client_type(&self) -> &str;

    /// Chain tracked by the light client.
    fn chain_id(&self) -> ChainId;

    /// Structure of the proofs committed by the tracked chain, leaf layer first.
    fn proof_specs(&self) -> &ProofSpecs;
}

/// The view of a light client consensus state needed to verify query proofs.
pub trait QueryConsensusState {
    fn root(&self) -> &CommitmentRoot;
}

/// Methods required to validate query responses, to be implemented by the host
pub trait IcqValidationContext {
    type ClientState: QueryClientState;
    type ConsensusState: QueryConsensusState;

    /// Returns the current time of the state transition being executed.
    fn host_timestamp(&self) -> Result<Timestamp, IcqError>;

    /// Returns the pending query stored under `query_path`, if any.
    fn query(&self, query_path: &QueryPath) -> Result<Option<QueryRecord>, IcqError>;

    /// Returns all pending queries, ordered by their store key.
    fn queries(&self) -> Result<Vec<QueryRecord>, IcqError>;

    /// Returns the connection end of `conn_id`, if any.
    fn connection_end(&self, conn_id: &ConnectionId) -> Result<Option<ConnectionEnd>, IcqError>;

    /// Returns the state of the light client `client_id`, if any.
    fn client_state(&self, client_id: &ClientId) -> Result<Option<Self::ClientState>, IcqError>;

    /// Returns the consensus state the light client `client_id` holds at
    /// `height`, if any.
    fn consensus_state(
        &self,
        client_id: &ClientId,
        height: &Height,
    ) -> Result<Option<Self::ConsensusState>, IcqError>;

    /// Validates the `signer` field of a relayed message.
    ///
    /// Hosts that do not restrict who may relay query responses only need
    /// to reject empty signers, which is what the default does.
    fn validate_message_signer(&self, signer: &Signer) -> Result<(), IcqError> {
        if signer.as_ref().is_empty() {
            return Err(IcqError::EmptySigner);
        }
        Ok(())
    }
}

/// Methods required to execute query responses, to be implemented by the host
pub trait IcqExecutionContext: IcqValidationContext {
    /// Stores `query` under `query_path`, replacing any previous record.
    fn store_query(&mut self, query_path: &QueryPath, query: QueryRecord)
        -> Result<(), IcqError>;

    /// Removes the record stored under `query_path`.
    fn delete_query(&mut self, query_path: &QueryPath) -> Result<(), IcqError>;

    /// Emits an event of the interchain query application
    fn emit_icq_event(&mut self, event: IcqEvent) -> Result<(), IcqError>;

    /// Logs a message
    fn log_message(&mut self, message: String) -> Result<(), IcqError>;
}
